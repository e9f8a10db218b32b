// Market data module entrypoint
pub mod adapters;       // source-specific fetchers (e.g. CoinGecko)
pub mod normaliser;     // converts wire records -> MarketEntry
pub mod types;          // MarketEntry + FetchError

pub use adapters::MarketDataSource;
pub use types::{FetchError, MarketEntry};
