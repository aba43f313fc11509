use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A time range for a price-history request, in Unix seconds (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRange {
    pub from: i64,
    pub to: i64,
}

impl HistoryRange {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    /// Range from UTC midnight of `date` up to `now`.
    pub fn since(date: NaiveDate, now: DateTime<Utc>) -> Self {
        let from = date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        Self {
            from,
            to: now.timestamp(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.from > self.to {
            return Err(CoreError::BadRequest(format!(
                "'from' ({}) must not be after 'to' ({})",
                self.from, self.to
            )));
        }
        Ok(())
    }
}

/// One day of Bitcoin history as served by `/api/bitcoin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitcoinQuote {
    /// Calendar day, `YYYY-MM-DD` (UTC)
    pub date: String,
    /// Price in USD
    pub btc: f64,
}

/// Truncate a millisecond timestamp to its UTC calendar day.
/// `None` when the timestamp is outside chrono's representable range.
pub fn timestamp_ms_to_date(timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|dt| dt.date_naive())
}
