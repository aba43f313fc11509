pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;
use models::{
    chart::{visible_lines, ChartLine},
    price::{MarketData, PricePoint},
    simulation::{SimulationParams, SimulationResult},
    state::{Action, SimulatorState},
};
use services::simulation_service::{default_start_date, SimulationService};

/// Main entry point for the growth simulator core.
/// Holds the market data, the current UI state and the latest derived series.
#[must_use]
pub struct GrowthSimulator {
    market: MarketData,
    backbone: Vec<NaiveDate>,
    state: SimulatorState,
    result: SimulationResult,
    simulation_service: SimulationService,
}

impl std::fmt::Debug for GrowthSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrowthSimulator")
            .field("market_points", &self.market.total_points())
            .field("state", &self.state)
            .field("result_points", &self.result.len())
            .finish()
    }
}

impl GrowthSimulator {
    /// Build a simulator over `market` with default inputs and compute the first result.
    pub fn new(market: MarketData) -> Self {
        let backbone = market.date_backbone();
        let start_index = default_start_index(&market, &backbone);
        let state = SimulatorState {
            start_index,
            ..SimulatorState::default()
        };
        Self::build(market, backbone, state)
    }

    /// Build a simulator with an explicit initial state (start index is clamped).
    pub fn with_state(market: MarketData, state: SimulatorState) -> Self {
        let backbone = market.date_backbone();
        let state = SimulatorState {
            start_index: clamp_index(state.start_index, backbone.len()),
            ..state
        };
        Self::build(market, backbone, state)
    }

    // ── Actions ─────────────────────────────────────────────────────

    /// Apply one user input, then recompute and replace the derived series.
    ///
    /// Presentation-only actions (tab, visibility) leave the result untouched.
    pub fn dispatch(&mut self, action: Action) -> &SimulationResult {
        let mut next = self.state.apply(action);
        next.start_index = clamp_index(next.start_index, self.backbone.len());
        self.state = next;
        if action.affects_simulation() {
            self.recompute();
        }
        &self.result
    }

    /// Swap in another Bitcoin series (e.g. fetched through the history proxy)
    /// and recompute. The start index is clamped to the new backbone.
    pub fn replace_bitcoin_series(&mut self, bitcoin: Vec<PricePoint>) -> &SimulationResult {
        self.market = std::mem::take(&mut self.market).with_bitcoin(bitcoin);
        self.backbone = self.market.date_backbone();
        self.state.start_index = clamp_index(self.state.start_index, self.backbone.len());
        self.recompute();
        &self.result
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn state(&self) -> &SimulatorState {
        &self.state
    }

    #[must_use]
    pub fn result(&self) -> &SimulationResult {
        &self.result
    }

    #[must_use]
    pub fn market(&self) -> &MarketData {
        &self.market
    }

    /// Bitcoin dates; the start-date slider ranges over these indices.
    #[must_use]
    pub fn date_backbone(&self) -> &[NaiveDate] {
        &self.backbone
    }

    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.backbone.get(self.state.start_index).copied()
    }

    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.market.end_date()
    }

    /// Lines the active tab draws.
    #[must_use]
    pub fn visible_lines(&self) -> Vec<ChartLine> {
        visible_lines(self.state.tab, &self.state.visibility)
    }

    /// Current simulation inputs, or `None` when there are no dates at all.
    #[must_use]
    pub fn params(&self) -> Option<SimulationParams> {
        self.start_date()
            .map(|start| SimulationParams::new(self.state.amount, start))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn recompute(&mut self) {
        self.result = match self.params() {
            Some(params) => self
                .simulation_service
                .simulate(&self.market, &params, &self.state.weights),
            None => SimulationResult::empty(),
        };
    }

    fn build(market: MarketData, backbone: Vec<NaiveDate>, state: SimulatorState) -> Self {
        let mut simulator = Self {
            market,
            backbone,
            state,
            result: SimulationResult::empty(),
            simulation_service: SimulationService::new(),
        };
        simulator.recompute();
        simulator
    }
}

/// Backbone index of [`default_start_date`], or 0.
fn default_start_index(market: &MarketData, backbone: &[NaiveDate]) -> usize {
    default_start_date(&market.bitcoin)
        .and_then(|date| backbone.iter().position(|d| *d == date))
        .unwrap_or(0)
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
