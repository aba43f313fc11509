use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::asset::AssetClass;
use crate::models::price::{MarketData, PricePoint};

/// Calendar-day format used by every static dataset.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One raw dataset entry: a date plus whatever price field the exporter used.
#[derive(Deserialize)]
struct RawEntry {
    date: String,
    #[serde(flatten)]
    fields: HashMap<String, Value>,
}

/// Parse a `YYYY-MM-DD` day, ignoring surrounding whitespace.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Parse one static dataset: a JSON array of `{ "date": "...", "<price_field>": number }`.
///
/// - Dates are trimmed before parsing; an unparseable date rejects the whole dataset.
/// - A missing, null or non-numeric price becomes 0.0, which the simulator skips.
/// - Numeric strings (`"123.45"`) are accepted.
/// - Output is stably sorted by date. Duplicate dates are kept.
pub fn parse_series(
    dataset: &str,
    json: &str,
    price_field: &str,
) -> Result<Vec<PricePoint>, CoreError> {
    let entries: Vec<RawEntry> =
        serde_json::from_str(json).map_err(|e| CoreError::InvalidDataset {
            dataset: dataset.to_string(),
            message: e.to_string(),
        })?;

    let mut points = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let date = parse_date(&entry.date).ok_or_else(|| CoreError::InvalidDataset {
            dataset: dataset.to_string(),
            message: format!("entry {idx}: invalid date '{}'", entry.date),
        })?;
        let price = entry
            .fields
            .get(price_field)
            .and_then(price_from_value)
            .unwrap_or(0.0);
        points.push(PricePoint { date, price });
    }

    if !points.windows(2).all(|w| w[0].date <= w[1].date) {
        warn!(dataset, "dataset is not sorted by date, sorting");
        points.sort_by_key(|p| p.date);
    }

    debug!(dataset, points = points.len(), "parsed dataset");
    Ok(points)
}

fn price_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse the dataset of one asset class using its own price field name.
pub fn parse_asset_series(asset: AssetClass, json: &str) -> Result<Vec<PricePoint>, CoreError> {
    parse_series(asset.dataset_file(), json, asset.price_field())
}

/// Build [`MarketData`] from the three raw JSON documents.
pub fn parse_market_data(
    bitcoin_json: &str,
    equity_json: &str,
    bond_json: &str,
) -> Result<MarketData, CoreError> {
    Ok(MarketData::new(
        parse_asset_series(AssetClass::Bitcoin, bitcoin_json)?,
        parse_asset_series(AssetClass::Equity, equity_json)?,
        parse_asset_series(AssetClass::Bond, bond_json)?,
    ))
}

/// Load the three static datasets from `dir`
/// (`bitcoin.json`, `spy.json`, `vanguard-bond-total-with-dividends.json`).
pub fn load_market_data_from_dir(dir: impl AsRef<Path>) -> Result<MarketData, CoreError> {
    let dir = dir.as_ref();
    let read = |asset: AssetClass| -> Result<String, CoreError> {
        let path = dir.join(asset.dataset_file());
        std::fs::read_to_string(&path)
            .map_err(|e| CoreError::FileIO(format!("{}: {e}", path.display())))
    };

    parse_market_data(
        &read(AssetClass::Bitcoin)?,
        &read(AssetClass::Equity)?,
        &read(AssetClass::Bond)?,
    )
}
