use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::asset::AssetClass;

/// A single price data point (date → price).
///
/// A price of exactly zero means "no data for that day".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }

    /// True when this point can serve as a sample (strictly positive price).
    pub fn has_price(&self) -> bool {
        self.price > 0.0
    }
}

/// The three historical price series the simulator works on.
///
/// Each series is sorted ascending by date and never mutated after load.
/// The Bitcoin series is the date backbone: it defines the candidate dates
/// and the end of every simulation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketData {
    pub bitcoin: Vec<PricePoint>,
    pub equity: Vec<PricePoint>,
    pub bond: Vec<PricePoint>,
}

impl MarketData {
    pub fn new(bitcoin: Vec<PricePoint>, equity: Vec<PricePoint>, bond: Vec<PricePoint>) -> Self {
        Self {
            bitcoin,
            equity,
            bond,
        }
    }

    /// The series for one asset class.
    pub fn series(&self, asset: AssetClass) -> &[PricePoint] {
        match asset {
            AssetClass::Bitcoin => &self.bitcoin,
            AssetClass::Equity => &self.equity,
            AssetClass::Bond => &self.bond,
        }
    }

    /// All Bitcoin dates, in order. UI start-date indices point into this list.
    pub fn date_backbone(&self) -> Vec<NaiveDate> {
        self.bitcoin.iter().map(|p| p.date).collect()
    }

    /// Last date of the Bitcoin series, or `None` when it is empty.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.bitcoin.last().map(|p| p.date)
    }

    /// Replace the Bitcoin series, e.g. with one fetched through the history proxy.
    /// The other two series are kept as they are.
    pub fn with_bitcoin(self, bitcoin: Vec<PricePoint>) -> Self {
        Self { bitcoin, ..self }
    }

    /// Total number of points across all three series.
    pub fn total_points(&self) -> usize {
        self.bitcoin.len() + self.equity.len() + self.bond.len()
    }
}
