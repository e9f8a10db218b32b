use serde::Serialize;

/// One asset's market snapshot, as held by the view model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketEntry {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub image: String,
    pub current_price: Option<f64>,
    pub total_volume: Option<f64>,
    pub market_cap: f64,
    pub price_change_percentage_24h: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Server answered with a non-2xx status.
    #[error("HTTP {status}")]
    Http { status: u16 },
    /// Network failure or a body that is not the expected JSON array.
    #[error("{message}")]
    Transport { message: String },
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        FetchError::Transport { message: message.into() }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::transport(err.to_string())
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
