// Shared trait for market data sources

use crate::market_data::types::{FetchResult, MarketEntry};

/// A source of market snapshots. One call is one request; there is no retry.
#[async_trait::async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch_markets(&self) -> FetchResult<Vec<MarketEntry>>;
}

// Make the CoinGecko adapter visible
pub mod coingecko;
pub mod coingecko_types;
