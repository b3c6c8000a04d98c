use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use engine::{RunRecord, WorkflowData};
use super::AppState;

// POST /api/runs
pub async fn start(
    State(state): State<AppState>,
    Json(workflow): Json<WorkflowData>,
) -> (StatusCode, Json<RunRecord>) {
    let record = state.runner.run(&workflow).await;
    (StatusCode::CREATED, Json(record))
}

// GET /api/runs
pub async fn list(State(state): State<AppState>) -> Json<Vec<RunRecord>> {
    Json(state.runner.history())
}

// GET /api/runs/:id
pub async fn get(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<RunRecord>, StatusCode> {
    state
        .runner
        .get(id.into())
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

// DELETE /api/runs
pub async fn clear(State(state): State<AppState>) -> StatusCode {
    state.runner.clear_history();
    StatusCode::NO_CONTENT
}
