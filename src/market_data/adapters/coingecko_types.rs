// Source: https://api.coingecko.com/api/v3/coins/markets
// Only the fields the table shows; serde ignores the rest.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CoinMarket {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub image: String,
    pub current_price: Option<f64>,
    pub total_volume: Option<f64>,
    pub market_cap: Option<f64>, // documented as always present, but the API can send null
    pub price_change_percentage_24h: Option<f64>,
}

// Query string for GET /coins/markets
#[derive(Debug, Clone, serde::Serialize)]
pub struct MarketsQuery {
    pub vs_currency: String,   // e.g. "usd"
    pub order: String,         // e.g. "market_cap_desc"
    pub per_page: u32,
    pub page: u32,
    pub sparkline: bool,
}
