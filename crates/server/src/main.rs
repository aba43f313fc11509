//! Growth simulator server binary.
//!
//! Run with:
//! ```bash
//! growth-sim-server --listen 127.0.0.1:3000 --data-dir ./data
//! ```

use anyhow::Result;
use clap::Parser;
use growth_sim_core::providers::coingecko::DEFAULT_BASE_URL;
use growth_sim_server::{run_server, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "growth-sim-server")]
#[command(about = "Bitcoin history proxy and investment growth simulator")]
struct Args {
    /// Address to listen on
    #[arg(short, long, env = "GROWTH_SIM_LISTEN", default_value = "0.0.0.0:3000")]
    listen: SocketAddr,

    /// CoinGecko API root
    #[arg(long, env = "COINGECKO_BASE_URL", default_value = DEFAULT_BASE_URL)]
    coingecko_url: String,

    /// CoinGecko demo API key (optional)
    #[arg(long, env = "COINGECKO_API_KEY", hide_env_values = true)]
    coingecko_api_key: Option<String>,

    /// Directory with bitcoin.json, spy.json and vanguard-bond-total-with-dividends.json
    #[arg(short, long, env = "GROWTH_SIM_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "growth_sim_server=debug,growth_sim_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting growth simulator server");
    info!("  Listen: {}", args.listen);
    info!("  CoinGecko: {}", args.coingecko_url);
    if let Some(dir) = &args.data_dir {
        info!("  Data dir: {}", dir.display());
    }

    let config = ServerConfig {
        listen_addr: args.listen,
        coingecko_url: args.coingecko_url,
        coingecko_api_key: args.coingecko_api_key,
        data_dir: args.data_dir,
    };

    run_server(config).await
}
