//! Server configuration.

use anyhow::Context;
use growth_sim_core::models::price::MarketData;
use growth_sim_core::providers::coingecko::CoinGeckoProvider;
use growth_sim_core::services::dataset_service::load_market_data_from_dir;
use growth_sim_core::services::history_service::HistoryService;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::handlers::AppState;

/// Server configuration, filled from CLI flags / environment by the binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub coingecko_url: String,
    pub coingecko_api_key: Option<String>,
    /// Directory holding the three static datasets. `/api/simulate` is disabled without it.
    pub data_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Build the shared handler state: the upstream provider and, if configured,
    /// the static datasets (loaded once, read-only afterwards).
    pub fn build_state(&self) -> anyhow::Result<AppState> {
        let provider = CoinGeckoProvider::with_base_url(self.coingecko_url.clone())
            .with_api_key(self.coingecko_api_key.clone());
        let history = HistoryService::new(Box::new(provider));

        let market = match &self.data_dir {
            Some(dir) => {
                let market: MarketData = load_market_data_from_dir(dir)
                    .with_context(|| format!("loading datasets from {}", dir.display()))?;
                info!(
                    dir = %dir.display(),
                    bitcoin = market.bitcoin.len(),
                    equity = market.equity.len(),
                    bond = market.bond.len(),
                    "datasets loaded"
                );
                Some(Arc::new(market))
            }
            None => {
                info!("no data directory configured, /api/simulate disabled");
                None
            }
        };

        Ok(AppState {
            history: Arc::new(history),
            market,
        })
    }
}
