//! HTTP request handlers.

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use growth_sim_core::errors::CoreError;
use growth_sim_core::models::allocation::AllocationWeights;
use growth_sim_core::models::asset::AssetClass;
use growth_sim_core::models::history::BitcoinQuote;
use growth_sim_core::models::price::MarketData;
use growth_sim_core::models::simulation::{BlendedPoint, GrowthPoint, SimulationParams};
use growth_sim_core::models::state::DEFAULT_AMOUNT;
use growth_sim_core::services::dataset_service::parse_date;
use growth_sim_core::services::history_service::HistoryService;
use growth_sim_core::services::simulation_service::{default_start_date, SimulationService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub history: Arc<HistoryService>,
    pub market: Option<Arc<MarketData>>,
}

#[derive(Debug, Deserialize)]
pub struct BitcoinQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// GET /api/bitcoin?from=<unix-seconds>&to=<unix-seconds>
pub async fn bitcoin_history(
    State(state): State<AppState>,
    Query(query): Query<BitcoinQuery>,
) -> Result<Json<Vec<BitcoinQuote>>, ApiError> {
    let quotes = state
        .history
        .fetch_quotes(query.from.as_deref(), query.to.as_deref())
        .await?;
    Ok(Json(quotes))
}

#[derive(Debug, Deserialize)]
pub struct SimulateQuery {
    pub start: Option<String>,
    /// Kept as text: anything that is not a number simulates with NaN.
    pub amount: Option<String>,
    /// Weights are kept as text too, so a bad value gets a JSON 400.
    pub btc: Option<String>,
    pub equity: Option<String>,
    pub bond: Option<String>,
}

impl SimulateQuery {
    fn weight(&self, asset: AssetClass) -> Option<&str> {
        let raw = match asset {
            AssetClass::Bitcoin => &self.btc,
            AssetClass::Equity => &self.equity,
            AssetClass::Bond => &self.bond,
        };
        raw.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}

/// Message for a weight that is not a finite number.
pub const INVALID_WEIGHT_MESSAGE: &str = "Invalid weight";

#[derive(Debug, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub amount: f64,
    pub weights: AllocationWeights,
    pub growth: Vec<GrowthPoint>,
    pub portfolio: Vec<BlendedPoint>,
}

fn parse_amount(raw: Option<&str>) -> f64 {
    match raw.map(str::trim) {
        None | Some("") => DEFAULT_AMOUNT,
        Some(text) => text.parse().unwrap_or(f64::NAN),
    }
}

/// Allocation from the `btc` / `equity` / `bond` parameters.
///
/// - None given (absent or empty) → the 33/33/34 default
/// - All three given → used as is, normalized by their total
/// - Some given → applied one by one, in display order, to the default
///   through the rebalancer, the same way the sliders would
fn weights_from_query(query: &SimulateQuery) -> Result<AllocationWeights, CoreError> {
    let mut given = Vec::with_capacity(AssetClass::ALL.len());
    for asset in AssetClass::ALL {
        if let Some(raw) = query.weight(asset) {
            let value = raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| CoreError::BadRequest(INVALID_WEIGHT_MESSAGE.to_string()))?;
            given.push((asset, value));
        }
    }

    if let [(_, btc), (_, equity), (_, bond)] = given[..] {
        return Ok(AllocationWeights::new(btc, equity, bond));
    }
    Ok(given
        .into_iter()
        .fold(AllocationWeights::default(), |weights, (asset, value)| {
            weights.rebalance(asset, value)
        }))
}

/// GET /api/simulate?start=YYYY-MM-DD&amount=100&btc=33&equity=33&bond=34
pub async fn simulate(
    State(state): State<AppState>,
    Query(query): Query<SimulateQuery>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let market = state.market.as_ref().ok_or(ApiError::DatasetsNotLoaded)?;

    let start_date = match query.start.as_deref().map(str::trim) {
        None | Some("") => default_start_date(&market.bitcoin),
        Some(raw) => Some(
            parse_date(raw).ok_or_else(|| CoreError::BadRequest("Invalid 'start'".into()))?,
        ),
    };
    let amount = parse_amount(query.amount.as_deref());
    let weights = weights_from_query(&query)?;

    let result = match start_date {
        Some(start) => SimulationService::new().simulate(
            market,
            &SimulationParams::new(amount, start),
            &weights,
        ),
        None => Default::default(),
    };
    debug!(?start_date, amount, points = result.growth.len(), "simulate");

    Ok(Json(SimulateResponse {
        start_date,
        end_date: market.end_date(),
        amount,
        weights,
        growth: result.growth,
        portfolio: result.portfolio,
    }))
}
