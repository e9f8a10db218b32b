// CoinGecko /coins/markets adapter: one GET, whole page, no pagination.

use std::time::Instant;

use itertools::Itertools;
use tracing::{debug, error, info, instrument, warn};

use super::coingecko_types::{CoinMarket, MarketsQuery};
use super::MarketDataSource;
use crate::config::Settings;
use crate::market_data::normaliser;
use crate::market_data::types::{FetchError, FetchResult, MarketEntry};
use crate::telemetry;

pub const DEFAULT_ENDPOINT: &str = "https://api.coingecko.com/api/v3/coins/markets";

pub struct CoinGeckoAdapter {
    pub endpoint: String, // "https://api.coingecko.com/api/v3/coins/markets"
    pub query: MarketsQuery,
    client: reqwest::Client,
}

impl CoinGeckoAdapter {
    pub fn new(endpoint: &str, query: MarketsQuery) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("coinview/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { endpoint: endpoint.to_string(), query, client })
    }

    pub fn from_settings(settings: &Settings) -> FetchResult<Self> {
        let query = MarketsQuery {
            vs_currency: settings.vs_currency.clone(),
            order: settings.order.clone(),
            per_page: settings.per_page,
            page: settings.page,
            sparkline: settings.sparkline,
        };
        Self::new(&settings.endpoint, query)
    }

    async fn request(&self) -> FetchResult<Vec<MarketEntry>> {
        let res = self.client
            .get(&self.endpoint)
            .query(&self.query)
            .send()
            .await?;

        let status = res.status().as_u16();
        // The status alone decides a rejection; a broken error body must not mask it
        if !res.status().is_success() {
            return Err(FetchError::Http { status });
        }
        let body = res.text().await?;
        decode_response(status, &body)
    }
}

/// Turn a status code and raw body into rows. Kept free of I/O so it can be tested directly.
pub fn decode_response(status: u16, body: &str) -> FetchResult<Vec<MarketEntry>> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Http { status });
    }

    let raw: Vec<CoinMarket> = serde_json::from_str(body)
        .map_err(|e| FetchError::transport(format!("malformed response body: {}", e)))?;

    let dupes: Vec<&str> = raw.iter().map(|r| r.id.as_str()).duplicates().collect();
    if !dupes.is_empty() {
        warn!(?dupes, "source returned duplicate ids");
    }

    Ok(normaliser::normalise_all(raw))
}

#[async_trait::async_trait]
impl MarketDataSource for CoinGeckoAdapter {
    #[instrument(skip(self), fields(endpoint = %self.endpoint, per_page = self.query.per_page))]
    async fn fetch_markets(&self) -> FetchResult<Vec<MarketEntry>> {
        let start = Instant::now();
        debug!(vs_currency = %self.query.vs_currency, "requesting markets");

        let result = self.request().await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0;

        match &result {
            Ok(rows) => {
                info!(rows = rows.len(), elapsed_ms, "fetched markets");
                telemetry::record_fetch("ok", elapsed_ms);
            }
            Err(e @ FetchError::Http { .. }) => {
                error!(error = %e, elapsed_ms, "markets request rejected");
                telemetry::record_fetch("http_error", elapsed_ms);
            }
            Err(e @ FetchError::Transport { .. }) => {
                error!(error = %e, elapsed_ms, "markets request failed");
                telemetry::record_fetch("transport_error", elapsed_ms);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_COINS: &str = r#"[
        {"id":"bitcoin","symbol":"btc","name":"Bitcoin","image":"https://img/btc.png",
         "current_price":67000.12,"market_cap":1320000000000,"total_volume":25000000000,
         "price_change_percentage_24h":1.5,"market_cap_rank":1,"ath":73000},
        {"id":"ethereum","symbol":"eth","name":"Ethereum","image":"https://img/eth.png",
         "current_price":null,"market_cap":400000000000,"total_volume":null,
         "price_change_percentage_24h":null}
    ]"#;

    #[test]
    fn test_decode_success() {
        let rows = decode_response(200, TWO_COINS).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "bitcoin");
        assert_eq!(rows[0].market_cap, 1.32e12);
        assert_eq!(rows[1].current_price, None);
        assert_eq!(rows[1].price_change_percentage_24h, None);
    }

    #[test]
    fn test_decode_http_error() {
        let err = decode_response(500, "oops").unwrap_err();
        assert_eq!(err, FetchError::Http { status: 500 });
    }

    #[test]
    fn test_decode_rate_limited() {
        let err = decode_response(429, r#"{"status":{"error_code":429}}"#).unwrap_err();
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn test_decode_malformed_body() {
        let err = decode_response(200, "<html>maintenance</html>").unwrap_err();
        match err {
            FetchError::Transport { message } => assert!(message.contains("malformed")),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_missing_field_is_transport_error() {
        let err = decode_response(200, r#"[{"id":"x"}]"#).unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode_response(200, "[]").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let query = MarketsQuery {
            vs_currency: "usd".into(),
            order: "market_cap_desc".into(),
            per_page: 10,
            page: 1,
            sparkline: false,
        };
        // Port 9 (discard) on localhost is closed in test environments
        let adapter = CoinGeckoAdapter::new("http://127.0.0.1:9/coins/markets", query).unwrap();
        let err = adapter.fetch_markets().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
