// ═══════════════════════════════════════════════════════════════════
// Provider Tests — CoinGecko URL building and market-chart parsing
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use std::time::Duration;

use growth_sim_core::errors::{CoreError, ErrorKind};
use growth_sim_core::models::history::HistoryRange;
use growth_sim_core::models::price::PricePoint;
use growth_sim_core::providers::coingecko::{
    parse_market_chart, CoinGeckoProvider, DEFAULT_BASE_URL, REQUEST_TIMEOUT,
};
use growth_sim_core::providers::traits::PriceHistoryProvider;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Request building
// ═══════════════════════════════════════════════════════════════════

mod coingecko_request {
    use super::*;

    #[test]
    fn name() {
        assert_eq!(CoinGeckoProvider::new().name(), "CoinGecko");
    }

    #[test]
    fn default_url() {
        let provider = CoinGeckoProvider::default();
        assert_eq!(
            provider.range_url(HistoryRange::new(1_699_920_000, 1_700_006_400)),
            format!(
                "{DEFAULT_BASE_URL}/coins/bitcoin/market_chart/range?vs_currency=usd&from=1699920000&to=1700006400"
            )
        );
    }

    #[test]
    fn custom_base_url_trailing_slash() {
        let provider = CoinGeckoProvider::with_base_url("http://127.0.0.1:9000/api/v3/");
        assert_eq!(
            provider.range_url(HistoryRange::new(1, 2)),
            "http://127.0.0.1:9000/api/v3/coins/bitcoin/market_chart/range?vs_currency=usd&from=1&to=2"
        );
    }

    #[test]
    fn api_key_does_not_change_url() {
        let range = HistoryRange::new(10, 20);
        let plain = CoinGeckoProvider::new();
        let keyed = CoinGeckoProvider::new().with_api_key(Some("CG-demo".into()));
        assert_eq!(plain.range_url(range), keyed.range_url(range));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Response parsing
// ═══════════════════════════════════════════════════════════════════

mod coingecko_response {
    use super::*;

    #[test]
    fn single_point() {
        let points = parse_market_chart(r#"{"prices":[[1700000000000,35000]]}"#).unwrap();
        assert_eq!(points, vec![PricePoint::new(d(2023, 11, 14), 35000.0)]);
    }

    #[test]
    fn extra_fields_ignored() {
        let body = r#"{
            "prices": [[1700000000000, 35000.5]],
            "market_caps": [[1700000000000, 684000000000]],
            "total_volumes": [[1700000000000, 17000000000]]
        }"#;
        let points = parse_market_chart(body).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].price, 35000.5);
    }

    #[test]
    fn same_day_samples_kept_in_order() {
        // 00:00, 12:00 and 23:59:59 UTC on 2023-11-14, then 2023-11-15
        let body = r#"{"prices":[
            [1699920000000, 1.0],
            [1699963200000, 2.0],
            [1700006399000, 3.0],
            [1700006400000, 4.0]
        ]}"#;
        let points = parse_market_chart(body).unwrap();
        let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![d(2023, 11, 14), d(2023, 11, 14), d(2023, 11, 14), d(2023, 11, 15)]
        );
        let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn empty_prices() {
        assert!(parse_market_chart(r#"{"prices":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn missing_prices_is_deserialization_error() {
        let err = parse_market_chart(r#"{"error":"coin not found"}"#).unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn not_json_is_deserialization_error() {
        let err = parse_market_chart("<html>rate limited</html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Server);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Transport failures
// ═══════════════════════════════════════════════════════════════════

mod coingecko_transport {
    use super::*;

    #[test]
    fn requests_are_bounded() {
        assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let provider = CoinGeckoProvider::with_base_url("http://127.0.0.1:1");
        let err = provider
            .get_price_history(HistoryRange::new(1_699_920_000, 1_700_006_400))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Network(_)), "{err:?}");
        assert_eq!(err.kind(), ErrorKind::Server);
        // the query string never reaches the message
        assert!(!err.to_string().contains("vs_currency"));
    }
}
