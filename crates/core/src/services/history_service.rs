use tracing::debug;

use crate::errors::CoreError;
use crate::models::history::{BitcoinQuote, HistoryRange};
use crate::models::price::PricePoint;
use crate::providers::traits::PriceHistoryProvider;
use crate::services::dataset_service::DATE_FORMAT;

/// Message for an absent (or empty) `from` / `to` parameter.
pub const MISSING_RANGE_MESSAGE: &str = "Missing 'from' or 'to'";
/// Message for a `from` / `to` parameter that is not an integer.
pub const INVALID_RANGE_MESSAGE: &str = "Invalid 'from' or 'to'";

/// Serves Bitcoin price history through a [`PriceHistoryProvider`].
///
/// Input validation happens here, before any upstream call: a request that
/// fails validation never reaches the provider.
pub struct HistoryService {
    provider: Box<dyn PriceHistoryProvider>,
}

impl HistoryService {
    pub fn new(provider: Box<dyn PriceHistoryProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Validate raw `from` / `to` query values and fetch the range.
    pub async fn fetch_quotes(
        &self,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<BitcoinQuote>, CoreError> {
        let range = parse_range(from, to)?;
        let points = self.provider.get_price_history(range).await?;
        debug!(
            provider = self.provider.name(),
            from = range.from,
            to = range.to,
            points = points.len(),
            "fetched price history"
        );
        Ok(to_quotes(&points))
    }
}

/// Turn raw query values into a [`HistoryRange`].
///
/// - Absent or empty → `BadRequest` ("Missing 'from' or 'to'")
/// - Not an integer → `BadRequest` ("Invalid 'from' or 'to'")
/// - `from > to` → `BadRequest`
pub fn parse_range(from: Option<&str>, to: Option<&str>) -> Result<HistoryRange, CoreError> {
    let (Some(from), Some(to)) = (non_empty(from), non_empty(to)) else {
        return Err(CoreError::BadRequest(MISSING_RANGE_MESSAGE.to_string()));
    };
    let parse = |raw: &str| {
        raw.parse::<i64>()
            .map_err(|_| CoreError::BadRequest(INVALID_RANGE_MESSAGE.to_string()))
    };
    let range = HistoryRange::new(parse(from)?, parse(to)?);
    range.validate()?;
    Ok(range)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Wire records for `/api/bitcoin`.
pub fn to_quotes(points: &[PricePoint]) -> Vec<BitcoinQuote> {
    points
        .iter()
        .map(|p| BitcoinQuote {
            date: p.date.format(DATE_FORMAT).to_string(),
            btc: p.price,
        })
        .collect()
}

/// Back to price points, e.g. to feed a fetched history into the simulator.
/// Quotes with an unparseable date are dropped.
pub fn quotes_to_points(quotes: &[BitcoinQuote]) -> Vec<PricePoint> {
    quotes
        .iter()
        .filter_map(|q| {
            let date = crate::services::dataset_service::parse_date(&q.date)?;
            Some(PricePoint::new(date, q.btc))
        })
        .collect()
}
