use serde::{Deserialize, Serialize};

use super::allocation::AllocationWeights;
use super::asset::AssetClass;
use super::chart::{AssetVisibility, ChartTab};

/// Initial investment shown when the simulator opens.
pub const DEFAULT_AMOUNT: f64 = 100.0;

/// Everything the user can change, as one immutable value.
///
/// The host owns mutation: it sends an [`Action`], gets a new state back from
/// [`SimulatorState::apply`], and recomputes the derived series from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatorState {
    /// Initial investment in USD
    pub amount: f64,

    /// Index into the Bitcoin date backbone
    pub start_index: usize,

    pub weights: AllocationWeights,

    pub tab: ChartTab,

    pub visibility: AssetVisibility,
}

impl Default for SimulatorState {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT,
            start_index: 0,
            weights: AllocationWeights::default(),
            tab: ChartTab::default(),
            visibility: AssetVisibility::default(),
        }
    }
}

/// One discrete user input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Action {
    /// Amount field edited. Any value is accepted, including NaN.
    SetAmount(f64),
    /// Start-date slider moved
    SetStartIndex(usize),
    /// Allocation slider moved; the other two weights follow
    SetWeight(AssetClass, f64),
    /// Growth-chart checkbox clicked
    ToggleVisibility(AssetClass),
    SelectTab(ChartTab),
}

impl Action {
    /// Whether this action changes a simulation input (as opposed to presentation only).
    pub fn affects_simulation(&self) -> bool {
        matches!(
            self,
            Action::SetAmount(_) | Action::SetStartIndex(_) | Action::SetWeight(..)
        )
    }
}

impl SimulatorState {
    /// Pure reducer: the state after `action`.
    #[must_use]
    pub fn apply(&self, action: Action) -> Self {
        let mut next = *self;
        match action {
            Action::SetAmount(amount) => next.amount = amount,
            Action::SetStartIndex(index) => next.start_index = index,
            Action::SetWeight(asset, value) => next.weights = self.weights.rebalance(asset, value),
            Action::ToggleVisibility(asset) => next.visibility = self.visibility.toggled(asset),
            Action::SelectTab(tab) => next.tab = tab,
        }
        next
    }
}
