//! HTTP server for the paperdeck backend.

pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;
use routes::AppState;

/// The backend HTTP server.
pub struct AppServer {
    state: Arc<AppState>,
}

impl AppServer {
    /// Build the server and its upstream clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let state = Arc::new(AppState::new(config)?);
        Ok(Self { state })
    }

    /// Run the server until ctrl-c.
    ///
    /// # Errors
    ///
    /// Returns error on bind or serve failure.
    pub async fn run(self, port: u16) -> anyhow::Result<()> {
        let router = routes::create_router(self.state);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }
}

impl std::fmt::Debug for AppServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppServer").finish()
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.expect("Failed to install CTRL+C handler");
    tracing::info!("Received shutdown signal");
}
