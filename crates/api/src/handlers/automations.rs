use axum::{extract::State, http::StatusCode, Json};
use tracing::warn;

use ::automations::AutomationAction;
use super::AppState;

// GET /api/automations
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<AutomationAction>>, StatusCode> {
    match state.catalog.list_actions().await {
        Ok(actions) => Ok(Json(actions)),
        Err(e) => {
            warn!("automation catalog request failed: {e}");
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}
