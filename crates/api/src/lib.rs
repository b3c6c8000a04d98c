//! `api` crate — HTTP layer over the simulation engine.
//!
//! Exposes:
//!   GET    /api/health
//!   GET    /api/automations
//!   POST   /api/simulate
//!   POST   /api/runs
//!   GET    /api/runs
//!   GET    /api/runs/:id
//!   DELETE /api/runs

pub mod handlers;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use automations::{AutomationCatalog, BuiltinCatalog};
use engine::{RunnerConfig, SimulationRunner};

pub use handlers::AppState;

/// Server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    /// Maximum number of simulation runs kept in memory.
    pub history_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            history_capacity: RunnerConfig::default().history_capacity,
        }
    }
}

impl AppState {
    pub fn new(catalog: Arc<dyn AutomationCatalog>, runner: SimulationRunner) -> Self {
        Self { catalog, runner }
    }

    /// State backed by the builtin catalog and the in-process simulator.
    pub fn local(config: &ServerConfig) -> Self {
        Self::new(
            Arc::new(BuiltinCatalog),
            SimulationRunner::local(RunnerConfig { history_capacity: config.history_capacity }),
        )
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/automations", get(handlers::automations::list))
        .route("/api/simulate", post(handlers::simulate::simulate))
        .route(
            "/api/runs",
            post(handlers::runs::start)
                .get(handlers::runs::list)
                .delete(handlers::runs::clear),
        )
        .route("/api/runs/:id", get(handlers::runs::get))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API until Ctrl-C is received.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let app = router(AppState::local(&config));

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(bind = %config.bind, history_capacity = config.history_capacity, "API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("server error")?;

    info!("API shut down");
    Ok(())
}
