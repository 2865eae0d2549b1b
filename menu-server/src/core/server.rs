//! Server Implementation
//!
//! HTTP server startup and shutdown

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::core::{Config, Result, ServerError, ServerState, sweep_idle_dashboards};
use crate::routes::build_app;

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config)?,
        };

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        tracing::info!(%addr, backend = self.config.backend_mode.as_str(), "Menu server listening");

        let sweep_shutdown = CancellationToken::new();
        let sweeper = tokio::spawn(sweep_idle_dashboards(
            state.dashboards.clone(),
            Duration::from_secs(self.config.dashboard_idle_secs),
            sweep_shutdown.clone(),
        ));

        let app = build_app().with_state(state.clone());
        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        sweep_shutdown.cancel();
        let _ = sweeper.await;
        state.dashboards.clear();
        Ok(())
    }
}
