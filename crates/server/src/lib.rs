//! HTTP server for the investment growth simulator.
//!
//! ## Routes
//!
//! - `GET /api/bitcoin?from=<unix-seconds>&to=<unix-seconds>` proxies CoinGecko's
//!   Bitcoin market-chart range and answers `[{ "date": "YYYY-MM-DD", "btc": number }]`.
//! - `GET /api/simulate?start=&amount=&btc=&equity=&bond=` runs the portfolio
//!   simulation over the static datasets (only when a data directory is configured).
//!   With all three weights given they are used as is. With only some given, each
//!   is applied to the 33/33/34 default through the rebalancer, so `btc=50` means
//!   50% Bitcoin with the rest split between the others in their default ratio.
//!   A weight that is not a number answers 400 `{"error":"Invalid weight"}`.

pub mod config;
pub mod error;
pub mod handlers;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::ServerConfig;
pub use handlers::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/api/bitcoin", get(handlers::bitcoin_history))
        .route("/api/simulate", get(handlers::simulate))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind `config.listen_addr` and serve until the process is stopped.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = config.build_state()?;
    let app = router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
