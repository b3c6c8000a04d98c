//! Request handlers, one module per resource.

pub mod automations;
pub mod runs;
pub mod simulate;

use std::sync::Arc;

use axum::Json;
use serde_json::{json, Value};

use ::automations::AutomationCatalog;
use engine::SimulationRunner;

/// Shared state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn AutomationCatalog>,
    pub runner: SimulationRunner,
}

// GET /api/health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
