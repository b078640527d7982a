//! Axum route handler for the schedule synchronizer.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::schedule::synchronizer::synchronize_schedule;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub success: bool,
    /// Tasks created plus tasks rescheduled in this run.
    pub count: usize,
}

/// POST /api/v1/schedule/sync
///
/// Regenerates and reconciles planning tasks from the user's current
/// deadlines. Idempotent; failures surface as the standard error shape and
/// leave any writes that already landed in place.
pub async fn handle_sync(
    State(state): State<AppState>,
    Json(request): Json<SyncRequest>,
) -> Result<Json<SyncResponse>, AppError> {
    let report = synchronize_schedule(state.store.as_ref(), request.user_id).await?;
    Ok(Json(SyncResponse {
        success: true,
        count: report.count(),
    }))
}
