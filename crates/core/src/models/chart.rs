use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::asset::AssetClass;

/// Legend label of the blended line.
pub const PORTFOLIO_LABEL: &str = "Diversified Portfolio";
/// Colour of the blended line.
pub const PORTFOLIO_COLOR: &str = "#007bff";

/// The two chart views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartTab {
    /// Total value of the weighted portfolio. Shown first.
    #[default]
    Blended,
    /// Each asset's growth as if the whole amount went into it.
    Growth,
}

/// Which assets the growth chart draws. Has no effect on the blended chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetVisibility {
    pub btc: bool,
    pub equity: bool,
    pub bond: bool,
}

impl Default for AssetVisibility {
    fn default() -> Self {
        Self {
            btc: true,
            equity: true,
            bond: true,
        }
    }
}

impl AssetVisibility {
    pub fn is_visible(&self, asset: AssetClass) -> bool {
        match asset {
            AssetClass::Bitcoin => self.btc,
            AssetClass::Equity => self.equity,
            AssetClass::Bond => self.bond,
        }
    }

    #[must_use]
    pub fn toggled(&self, asset: AssetClass) -> Self {
        let mut next = *self;
        match asset {
            AssetClass::Bitcoin => next.btc = !next.btc,
            AssetClass::Equity => next.equity = !next.equity,
            AssetClass::Bond => next.bond = !next.bond,
        }
        next
    }
}

/// What a chart line is keyed on in the data records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKey {
    Asset(AssetClass),
    Portfolio,
}

/// A line the rendering surface should draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLine {
    pub key: LineKey,
    pub label: &'static str,
    pub color: &'static str,
}

impl ChartLine {
    pub fn asset(asset: AssetClass) -> Self {
        Self {
            key: LineKey::Asset(asset),
            label: asset.label(),
            color: asset.color(),
        }
    }

    pub fn portfolio() -> Self {
        Self {
            key: LineKey::Portfolio,
            label: PORTFOLIO_LABEL,
            color: PORTFOLIO_COLOR,
        }
    }
}

/// Lines drawn for `tab` given the checkbox state.
pub fn visible_lines(tab: ChartTab, visibility: &AssetVisibility) -> Vec<ChartLine> {
    match tab {
        ChartTab::Blended => vec![ChartLine::portfolio()],
        ChartTab::Growth => AssetClass::ALL
            .iter()
            .filter(|a| visibility.is_visible(**a))
            .map(|a| ChartLine::asset(*a))
            .collect(),
    }
}

/// X-axis tick label: abbreviated month and year, e.g. "Nov 2023".
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}
