use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::history::HistoryRange;
use crate::models::price::PricePoint;

/// Source of historical Bitcoin prices.
///
/// The HTTP proxy depends on this trait only, so tests and alternative
/// upstreams plug in without touching the request handling.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Price history for `range`, in upstream order.
    ///
    /// One outbound request per call: no retries, no caching.
    async fn get_price_history(&self, range: HistoryRange) -> Result<Vec<PricePoint>, CoreError>;
}
