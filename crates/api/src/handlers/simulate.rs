use axum::Json;

use engine::{SimulationResult, WorkflowData};

// POST /api/simulate
//
// Stateless: nothing is recorded in run history.
pub async fn simulate(Json(workflow): Json<WorkflowData>) -> Json<SimulationResult> {
    Json(engine::simulate(&workflow))
}
