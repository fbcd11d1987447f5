//! HTTP server for advisor-rs
//!
//! Serves the shopping recommendation flow (`/`, `/results`), the stock
//! dashboard (`/stocks`, `/api/*`) and `/health`.

pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
pub mod templates;

pub use config::ServerConfig;
pub use routes::router;
pub use state::{AppState, SharedState};

use std::sync::Arc;
use tracing::info;

/// Bind and serve until Ctrl-C
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let address = config.bind_address();
    let state = Arc::new(AppState::from_config(&config)?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, environment = %config.environment, "Listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
