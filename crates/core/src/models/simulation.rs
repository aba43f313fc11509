use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::asset::AssetClass;

/// One value per asset class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetValues {
    pub btc: f64,
    pub equity: f64,
    pub bond: f64,
}

impl AssetValues {
    pub fn new(btc: f64, equity: f64, bond: f64) -> Self {
        Self { btc, equity, bond }
    }

    /// Build from a per-asset function, evaluated in display order.
    pub fn from_fn(mut f: impl FnMut(AssetClass) -> f64) -> Self {
        Self {
            btc: f(AssetClass::Bitcoin),
            equity: f(AssetClass::Equity),
            bond: f(AssetClass::Bond),
        }
    }

    pub fn get(&self, asset: AssetClass) -> f64 {
        match asset {
            AssetClass::Bitcoin => self.btc,
            AssetClass::Equity => self.equity,
            AssetClass::Bond => self.bond,
        }
    }

    pub fn set(&mut self, asset: AssetClass, value: f64) {
        match asset {
            AssetClass::Bitcoin => self.btc = value,
            AssetClass::Equity => self.equity = value,
            AssetClass::Bond => self.bond = value,
        }
    }

    pub fn sum(&self) -> f64 {
        self.btc + self.equity + self.bond
    }
}

/// A point on the per-asset growth chart.
///
/// Each value is what `amount` would be worth on `date` had all of it gone
/// into that single asset on the baseline date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub values: AssetValues,
}

/// A point on the blended portfolio chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendedPoint {
    pub date: NaiveDate,

    /// Sum of the weighted contributions
    pub portfolio_value: f64,

    /// Single-asset growth values on this date (same numbers as the growth chart)
    pub normalized: AssetValues,

    /// Each asset's share of `portfolio_value`: normalized × weight ratio
    pub contributions: AssetValues,
}

/// Inputs of one simulation run besides the market data and weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Initial investment in USD. Not validated: NaN propagates into the output.
    pub amount: f64,

    /// First calendar day of the simulation. The end is always the last Bitcoin date.
    pub start_date: NaiveDate,
}

impl SimulationParams {
    pub fn new(amount: f64, start_date: NaiveDate) -> Self {
        Self { amount, start_date }
    }
}

/// Derived series produced by one simulation run.
///
/// Regenerated from scratch on every input change, never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub growth: Vec<GrowthPoint>,
    pub portfolio: Vec<BlendedPoint>,
}

impl SimulationResult {
    /// The defined "no data" outcome: both series empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.growth.is_empty() && self.portfolio.is_empty()
    }

    pub fn len(&self) -> usize {
        self.growth.len()
    }

    /// Blended value on the last emitted date.
    pub fn final_portfolio_value(&self) -> Option<f64> {
        self.portfolio.last().map(|p| p.portfolio_value)
    }
}
