// ═══════════════════════════════════════════════════════════════════
// Integration Tests — dataset files on disk through the GrowthSimulator facade
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use std::fs;

use growth_sim_core::errors::CoreError;
use growth_sim_core::models::asset::AssetClass;
use growth_sim_core::models::chart::{ChartTab, LineKey};
use growth_sim_core::models::price::{MarketData, PricePoint};
use growth_sim_core::models::state::{Action, SimulatorState, DEFAULT_AMOUNT};
use growth_sim_core::services::dataset_service::load_market_data_from_dir;
use growth_sim_core::GrowthSimulator;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn p(date: NaiveDate, price: f64) -> PricePoint {
    PricePoint::new(date, price)
}

/// Daily series from 2022-12-29 to 2023-01-06; every asset priced on every day.
fn market() -> MarketData {
    let days: Vec<NaiveDate> = (0..9)
        .map(|i| d(2022, 12, 29) + chrono::Duration::days(i))
        .collect();
    let series = |base: f64, step: f64| -> Vec<PricePoint> {
        days.iter()
            .enumerate()
            .map(|(i, day)| p(*day, base + step * i as f64))
            .collect()
    };
    MarketData::new(series(100.0, 10.0), series(200.0, 2.0), series(50.0, -1.0))
}

const EPS: f64 = 1e-9;

// ═══════════════════════════════════════════════════════════════════
// Loading from disk
// ═══════════════════════════════════════════════════════════════════

mod load_from_dir {
    use super::*;

    fn write_datasets(dir: &std::path::Path) {
        fs::write(
            dir.join("bitcoin.json"),
            r#"[{"date":"2023-01-01","btc":16500},{"date":"2023-01-02","btc":16700}]"#,
        )
        .unwrap();
        fs::write(
            dir.join("spy.json"),
            r#"[{"date":"2023-01-01","spy":380},{"date":"2023-01-02 ","spy":384}]"#,
        )
        .unwrap();
        fs::write(
            dir.join("vanguard-bond-total-with-dividends.json"),
            r#"[{"date":"2023-01-01","adjusted_value":9.5},{"date":"2023-01-02","adjusted_value":null}]"#,
        )
        .unwrap();
    }

    #[test]
    fn loads_all_three() {
        let dir = tempfile::tempdir().unwrap();
        write_datasets(dir.path());
        let market = load_market_data_from_dir(dir.path()).unwrap();
        assert_eq!(market.bitcoin.len(), 2);
        assert_eq!(market.equity[1], p(d(2023, 1, 2), 384.0));
        assert_eq!(market.bond[1].price, 0.0);
        assert_eq!(market.total_points(), 6);
    }

    #[test]
    fn missing_file_is_file_io() {
        let dir = tempfile::tempdir().unwrap();
        write_datasets(dir.path());
        fs::remove_file(dir.path().join("spy.json")).unwrap();
        let err = load_market_data_from_dir(dir.path()).unwrap_err();
        match err {
            CoreError::FileIO(msg) => assert!(msg.contains("spy.json")),
            other => panic!("expected FileIO, got {other:?}"),
        }
    }

    #[test]
    fn loaded_data_simulates() {
        let dir = tempfile::tempdir().unwrap();
        write_datasets(dir.path());
        let sim = GrowthSimulator::new(load_market_data_from_dir(dir.path()).unwrap());
        // 2023-01-02 has no bond price, so only the baseline day survives
        assert_eq!(sim.result().len(), 1);
        assert_eq!(sim.result().growth[0].date, d(2023, 1, 1));
    }
}

// ═══════════════════════════════════════════════════════════════════
// GrowthSimulator
// ═══════════════════════════════════════════════════════════════════

mod simulator {
    use super::*;

    #[test]
    fn opens_on_first_day_of_2023() {
        let sim = GrowthSimulator::new(market());
        assert_eq!(sim.state().start_index, 3);
        assert_eq!(sim.start_date(), Some(d(2023, 1, 1)));
        assert_eq!(sim.end_date(), Some(d(2023, 1, 6)));
        assert_eq!(sim.state().amount, DEFAULT_AMOUNT);
        assert_eq!(sim.result().len(), 6);
    }

    #[test]
    fn opens_on_last_day_when_data_ends_before_2023() {
        let market = MarketData::new(
            vec![p(d(2022, 6, 1), 1.0), p(d(2022, 6, 2), 2.0)],
            vec![p(d(2022, 6, 1), 1.0), p(d(2022, 6, 2), 2.0)],
            vec![p(d(2022, 6, 1), 1.0), p(d(2022, 6, 2), 2.0)],
        );
        let sim = GrowthSimulator::new(market);
        assert_eq!(sim.start_date(), Some(d(2022, 6, 2)));
        assert_eq!(sim.result().len(), 1);
    }

    #[test]
    fn empty_market_has_empty_result() {
        let sim = GrowthSimulator::new(MarketData::default());
        assert_eq!(sim.start_date(), None);
        assert_eq!(sim.params(), None);
        assert!(sim.result().is_empty());
    }

    #[test]
    fn amount_change_rescales_everything() {
        let mut sim = GrowthSimulator::new(market());
        let before = sim.result().final_portfolio_value().unwrap();
        let after = sim
            .dispatch(Action::SetAmount(1000.0))
            .final_portfolio_value()
            .unwrap();
        assert!((after - before * 10.0).abs() < 1e-6);
    }

    #[test]
    fn start_index_moves_baseline() {
        let mut sim = GrowthSimulator::new(market());
        let result = sim.dispatch(Action::SetStartIndex(0)).clone();
        assert_eq!(result.growth[0].date, d(2022, 12, 29));
        assert_eq!(result.len(), 9);
        for asset in AssetClass::ALL {
            assert!((result.growth[0].values.get(asset) - DEFAULT_AMOUNT).abs() < EPS);
        }
    }

    #[test]
    fn start_index_is_clamped() {
        let mut sim = GrowthSimulator::new(market());
        sim.dispatch(Action::SetStartIndex(500));
        assert_eq!(sim.state().start_index, 8);
        assert_eq!(sim.start_date(), Some(d(2023, 1, 6)));
        assert_eq!(sim.result().len(), 1);
    }

    #[test]
    fn weight_change_rebalances_and_recomputes() {
        let mut sim = GrowthSimulator::new(market());
        sim.dispatch(Action::SetWeight(AssetClass::Bitcoin, 100.0));
        let weights = sim.state().weights;
        assert_eq!(weights.btc, 100.0);
        assert_eq!(weights.equity, 0.0);
        assert_eq!(weights.bond, 0.0);
        let last = sim.result().portfolio.last().unwrap();
        assert!((last.portfolio_value - last.normalized.btc).abs() < EPS);
    }

    #[test]
    fn presentation_actions_leave_result_alone() {
        let mut sim = GrowthSimulator::new(market());
        let before = sim.result().clone();
        sim.dispatch(Action::SelectTab(ChartTab::Growth));
        sim.dispatch(Action::ToggleVisibility(AssetClass::Equity));
        assert_eq!(sim.result(), &before);
        assert_eq!(sim.state().tab, ChartTab::Growth);
        assert!(!sim.state().visibility.equity);
    }

    #[test]
    fn visible_lines_follow_tab_and_checkboxes() {
        let mut sim = GrowthSimulator::new(market());
        let blended: Vec<LineKey> = sim.visible_lines().iter().map(|l| l.key).collect();
        assert_eq!(blended, vec![LineKey::Portfolio]);

        sim.dispatch(Action::SelectTab(ChartTab::Growth));
        sim.dispatch(Action::ToggleVisibility(AssetClass::Bitcoin));
        let growth: Vec<LineKey> = sim.visible_lines().iter().map(|l| l.key).collect();
        assert_eq!(
            growth,
            vec![LineKey::Asset(AssetClass::Equity), LineKey::Asset(AssetClass::Bond)]
        );
    }

    #[test]
    fn with_state_clamps_index() {
        let state = SimulatorState {
            start_index: 99,
            amount: 50.0,
            ..SimulatorState::default()
        };
        let sim = GrowthSimulator::with_state(market(), state);
        assert_eq!(sim.state().start_index, 8);
        assert_eq!(sim.result().growth[0].values.btc, 50.0);
    }

    #[test]
    fn replacing_bitcoin_series_recomputes() {
        let mut sim = GrowthSimulator::new(market());
        let fetched = vec![
            p(d(2023, 1, 1), 16500.0),
            p(d(2023, 1, 2), 16700.0),
            p(d(2023, 1, 3), 33000.0),
        ];
        let result = sim.replace_bitcoin_series(fetched).clone();
        // old index 3 is past the new backbone's end
        assert_eq!(sim.state().start_index, 2);
        assert_eq!(sim.date_backbone().len(), 3);
        assert_eq!(result.len(), 1);
        assert_eq!(result.growth[0].date, d(2023, 1, 3));
        assert_eq!(sim.market().equity.len(), 9);
    }
}
