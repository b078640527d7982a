//! Axum route handlers for progress surfaces. Both endpoints go through
//! `estimator::estimate_progress` — the one scoring implementation.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::college::CollegeRow;
use crate::progress::estimator::estimate_progress;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub college_id: Uuid,
    pub progress: u8,
}

#[derive(Debug, Serialize)]
pub struct CollegeProgressSummary {
    pub college_id: Uuid,
    pub name: String,
    pub status: String,
    pub progress: u8,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsSummaryResponse {
    pub colleges: Vec<CollegeProgressSummary>,
    pub average_progress: u8,
}

/// GET /api/v1/colleges/:id/progress
pub async fn handle_college_progress(
    State(state): State<AppState>,
    Path(college_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProgressResponse>, AppError> {
    let colleges = state.store.list_colleges(params.user_id).await?;
    let college = colleges
        .iter()
        .find(|c| c.id == college_id)
        .ok_or_else(|| AppError::NotFound(format!("College {college_id} not found")))?;

    let (essays, tasks) = tokio::try_join!(
        state.store.list_essays(params.user_id),
        state.store.list_tasks(params.user_id),
    )?;

    Ok(Json(ProgressResponse {
        college_id,
        progress: estimate_progress(college, &essays, &tasks),
    }))
}

/// GET /api/v1/analytics/summary
///
/// Per-college progress plus the portfolio average, for the dashboard and
/// analytics views.
pub async fn handle_analytics_summary(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<AnalyticsSummaryResponse>, AppError> {
    let (colleges, essays, tasks) = tokio::try_join!(
        state.store.list_colleges(params.user_id),
        state.store.list_essays(params.user_id),
        state.store.list_tasks(params.user_id),
    )?;

    let summaries: Vec<CollegeProgressSummary> = colleges
        .iter()
        .map(|c: &CollegeRow| CollegeProgressSummary {
            college_id: c.id,
            name: c.name.clone(),
            status: c.status.clone(),
            progress: estimate_progress(c, &essays, &tasks),
        })
        .collect();

    let average_progress = if summaries.is_empty() {
        0
    } else {
        let sum: u32 = summaries.iter().map(|s| s.progress as u32).sum();
        (sum as f64 / summaries.len() as f64).round() as u8
    };

    Ok(Json(AnalyticsSummaryResponse {
        colleges: summaries,
        average_progress,
    }))
}
