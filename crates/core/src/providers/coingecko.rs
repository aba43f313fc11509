use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

use super::traits::PriceHistoryProvider;
use crate::errors::CoreError;
use crate::models::history::{timestamp_ms_to_date, HistoryRange};
use crate::models::price::PricePoint;

/// Public CoinGecko API root.
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Upper bound on one upstream request, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying a CoinGecko demo-plan API key.
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// CoinGecko API provider for Bitcoin price history in USD.
///
/// - **Endpoint**: `/coins/bitcoin/market_chart/range?vs_currency=usd&from={s}&to={s}`
/// - **Auth**: none required; an optional demo key raises the rate limit.
/// - **Granularity**: chosen by CoinGecko from the range length (5-minute,
///   hourly or daily), so one calendar day may appear several times.
/// - **Timeout**: [`REQUEST_TIMEOUT`]. reqwest sets no overall timeout on its
///   own; this client does, and an expired request is a `Network` error
///   (HTTP 500 "Server error" at the proxy) rather than a hang.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the provider at another API root (a mirror, a paid plan host, a test server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    /// Full upstream URL for `range`.
    pub fn range_url(&self, range: HistoryRange) -> String {
        format!(
            "{}/coins/bitcoin/market_chart/range?vs_currency=usd&from={}&to={}",
            self.base_url, range.from, range.to
        )
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinGecko API response types ────────────────────────────────────

#[derive(Deserialize)]
struct MarketChartResponse {
    /// `[timestamp_ms, price]` pairs
    prices: Vec<(f64, f64)>,
}

/// Map CoinGecko's `[timestamp_ms, price]` pairs to daily points (UTC truncation).
/// Order and same-day duplicates are preserved.
fn to_price_points(pairs: &[(f64, f64)]) -> Vec<PricePoint> {
    pairs
        .iter()
        .filter_map(|&(timestamp_ms, price)| {
            let date = timestamp_ms_to_date(timestamp_ms as i64)?;
            Some(PricePoint { date, price })
        })
        .collect()
}

/// Parse a successful market-chart body.
pub fn parse_market_chart(body: &str) -> Result<Vec<PricePoint>, CoreError> {
    let parsed: MarketChartResponse = serde_json::from_str(body)?;
    Ok(to_price_points(&parsed.prices))
}

#[async_trait]
impl PriceHistoryProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "CoinGecko"
    }

    async fn get_price_history(&self, range: HistoryRange) -> Result<Vec<PricePoint>, CoreError> {
        let url = self.range_url(range);
        info!(%url, "CoinGecko API URL");

        let mut request = self.client.get(&url).header("accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(status = status.as_u16(), %body, "CoinGecko response error");
            return Err(CoreError::Upstream {
                provider: self.name().to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        parse_market_chart(&body)
    }
}
