use serde::{Deserialize, Serialize};

use super::asset::AssetClass;
use crate::services::rebalance_service;

/// Total every allocation sums to, in percent.
pub const TOTAL_ALLOCATION: f64 = 100.0;

/// Percentage allocation across the three asset classes.
///
/// Values produced by [`AllocationWeights::rebalance`] always sum to
/// [`TOTAL_ALLOCATION`] (up to floating-point rounding). Values built by hand
/// are taken as given; the simulator normalizes by their actual total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationWeights {
    pub btc: f64,
    pub equity: f64,
    pub bond: f64,
}

impl Default for AllocationWeights {
    /// The initial slider positions: 33 / 33 / 34.
    fn default() -> Self {
        Self {
            btc: 33.0,
            equity: 33.0,
            bond: 34.0,
        }
    }
}

impl AllocationWeights {
    pub fn new(btc: f64, equity: f64, bond: f64) -> Self {
        Self { btc, equity, bond }
    }

    pub fn get(&self, asset: AssetClass) -> f64 {
        match asset {
            AssetClass::Bitcoin => self.btc,
            AssetClass::Equity => self.equity,
            AssetClass::Bond => self.bond,
        }
    }

    pub(crate) fn set(&mut self, asset: AssetClass, value: f64) {
        match asset {
            AssetClass::Bitcoin => self.btc = value,
            AssetClass::Equity => self.equity = value,
            AssetClass::Bond => self.bond = value,
        }
    }

    pub fn total(&self) -> f64 {
        self.btc + self.equity + self.bond
    }

    /// Fraction of the blend held in `asset`: weight / total.
    /// Zero when the total is not positive, so an all-zero allocation blends to 0.
    pub fn ratio(&self, asset: AssetClass) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.get(asset) / total
        } else {
            0.0
        }
    }

    /// Set one weight and redistribute the remainder over the other two,
    /// keeping their prior ratio. See [`rebalance_service::rebalance`].
    #[must_use]
    pub fn rebalance(&self, edited: AssetClass, new_value: f64) -> Self {
        rebalance_service::rebalance(self, edited, new_value)
    }
}
