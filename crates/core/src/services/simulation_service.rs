use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::models::allocation::AllocationWeights;
use crate::models::asset::AssetClass;
use crate::models::price::{MarketData, PricePoint};
use crate::models::simulation::{
    AssetValues, BlendedPoint, GrowthPoint, SimulationParams, SimulationResult,
};

/// Simulates the historical growth of an investment across the three asset classes.
///
/// The core computes all the numbers; the rendering surface only draws them.
/// Output:
/// - Per-asset growth curves (full amount in one asset)
/// - The blended portfolio curve (amount split by allocation weights)
///
/// Stateless and deterministic: the same inputs always give the same output.
pub struct SimulationService;

impl SimulationService {
    pub fn new() -> Self {
        Self
    }

    /// Run a simulation from `params.start_date` to the last Bitcoin date.
    ///
    /// 1. Find each asset's baseline: first strictly positive price on or after the start.
    ///    If any asset has none, both output series are empty.
    /// 2. Walk the Bitcoin series (the date backbone) within `[start, end]`.
    /// 3. On each date where all three assets have a positive price, emit
    ///    `price / baseline * amount` per asset and the weighted blend.
    /// 4. Any other date is skipped: no interpolation, no carry-forward.
    pub fn simulate(
        &self,
        market: &MarketData,
        params: &SimulationParams,
        weights: &AllocationWeights,
    ) -> SimulationResult {
        let start = params.start_date;
        let Some(end) = market.end_date() else {
            warn!("Bitcoin series is empty, nothing to simulate");
            return SimulationResult::empty();
        };

        let mut baselines = AssetValues::default();
        for asset in AssetClass::ALL {
            match baseline_price(market.series(asset), start) {
                Some(price) => baselines.set(asset, price),
                None => {
                    warn!(%start, %asset, "Missing start price for selected date");
                    return SimulationResult::empty();
                }
            }
        }

        // Keyed lookups for the two non-backbone series; a duplicated date keeps its last entry.
        let equity_by_date = index_by_date(&market.equity);
        let bond_by_date = index_by_date(&market.bond);

        let ratios = AssetValues::from_fn(|asset| weights.ratio(asset));
        let mut growth = Vec::new();
        let mut portfolio = Vec::new();

        for point in &market.bitcoin {
            if point.date < start || point.date > end {
                continue;
            }
            let prices = AssetValues::new(
                point.price,
                equity_by_date.get(&point.date).copied().unwrap_or(0.0),
                bond_by_date.get(&point.date).copied().unwrap_or(0.0),
            );
            if !(prices.btc > 0.0 && prices.equity > 0.0 && prices.bond > 0.0) {
                continue;
            }

            let normalized = AssetValues::from_fn(|asset| {
                (prices.get(asset) / baselines.get(asset)) * params.amount
            });
            let contributions =
                AssetValues::from_fn(|asset| normalized.get(asset) * ratios.get(asset));

            growth.push(GrowthPoint {
                date: point.date,
                values: normalized,
            });
            portfolio.push(BlendedPoint {
                date: point.date,
                portfolio_value: contributions.sum(),
                normalized,
                contributions,
            });
        }

        debug!(%start, %end, points = growth.len(), "simulation recomputed");
        SimulationResult { growth, portfolio }
    }
}

impl Default for SimulationService {
    fn default() -> Self {
        Self::new()
    }
}

/// First strictly positive price dated on or after `start`.
pub fn baseline_price(series: &[PricePoint], start: NaiveDate) -> Option<f64> {
    series
        .iter()
        .find(|p| p.date >= start && p.has_price())
        .map(|p| p.price)
}

/// First date in `series` on or after `target`; the last date when `target` is
/// past the end; `None` for an empty series.
pub fn closest_available_date(series: &[PricePoint], target: NaiveDate) -> Option<NaiveDate> {
    series
        .iter()
        .find(|p| p.date >= target)
        .or_else(|| series.last())
        .map(|p| p.date)
}

/// Where the simulator opens: the first available date on or after 2023-01-01
/// (the last date when the series ends earlier).
pub fn default_start_date(series: &[PricePoint]) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2023, 1, 1).and_then(|target| closest_available_date(series, target))
}

fn index_by_date(series: &[PricePoint]) -> HashMap<NaiveDate, f64> {
    series.iter().map(|p| (p.date, p.price)).collect()
}
