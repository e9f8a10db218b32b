// Convert wire records into internal MarketEntry rows.
// Fields pass through verbatim; the only fix-up is a null market cap, which becomes 0.0.

use crate::market_data::adapters::coingecko_types::CoinMarket;
use crate::market_data::types::MarketEntry;

pub fn normalise(raw: CoinMarket) -> MarketEntry {
    MarketEntry {
        id: raw.id,
        name: raw.name,
        symbol: raw.symbol,
        image: raw.image,
        current_price: raw.current_price,
        total_volume: raw.total_volume,
        market_cap: raw.market_cap.unwrap_or(0.0),
        price_change_percentage_24h: raw.price_change_percentage_24h,
    }
}

pub fn normalise_all(raw: Vec<CoinMarket>) -> Vec<MarketEntry> {
    raw.into_iter().map(normalise).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, market_cap: Option<f64>) -> CoinMarket {
        CoinMarket {
            id: id.to_string(),
            name: "Bitcoin".to_string(),
            symbol: "btc".to_string(),
            image: "https://example.test/btc.png".to_string(),
            current_price: Some(67_000.5),
            total_volume: None,
            market_cap,
            price_change_percentage_24h: Some(-1.25),
        }
    }

    #[test]
    fn test_fields_pass_through() {
        let entry = normalise(raw("bitcoin", Some(1.3e12)));
        assert_eq!(entry.id, "bitcoin");
        // symbol stays lower-case; upper-casing is a display concern
        assert_eq!(entry.symbol, "btc");
        assert_eq!(entry.current_price, Some(67_000.5));
        assert_eq!(entry.total_volume, None);
        assert_eq!(entry.market_cap, 1.3e12);
        assert_eq!(entry.price_change_percentage_24h, Some(-1.25));
    }

    #[test]
    fn test_null_market_cap_becomes_zero() {
        let entry = normalise(raw("bitcoin", None));
        assert_eq!(entry.market_cap, 0.0);
    }

    #[test]
    fn test_normalise_all_keeps_order() {
        let rows = normalise_all(vec![raw("a", Some(1.0)), raw("b", Some(2.0))]);
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }
}
