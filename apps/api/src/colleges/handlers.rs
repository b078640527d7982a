//! Axum route handlers for the college list.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
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
pub struct CollegeWithProgress {
    #[serde(flatten)]
    pub college: CollegeRow,
    pub progress: u8,
}

#[derive(Debug, Deserialize)]
pub struct CreateCollegeRequest {
    pub user_id: Uuid,
    pub name: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    pub deadline: Option<NaiveDate>,
    #[serde(default = "default_deadline_type")]
    pub deadline_type: String,
    #[serde(default = "default_test_policy")]
    pub test_policy: String,
    #[serde(default)]
    pub lors_required: i32,
    #[serde(default)]
    pub portfolio_required: bool,
}

fn default_platform() -> String {
    "Common App".to_string()
}

fn default_deadline_type() -> String {
    "RD".to_string()
}

fn default_test_policy() -> String {
    "Optional".to_string()
}

#[derive(Debug, Deserialize)]
pub struct UpdateCollegeRequest {
    pub user_id: Uuid,
    pub status: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub deadline_type: Option<String>,
    pub test_policy: Option<String>,
    pub lors_required: Option<i32>,
}

/// GET /api/v1/colleges
///
/// The user's college list, each with its computed progress percentage.
pub async fn handle_list_colleges(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<CollegeWithProgress>>, AppError> {
    let (colleges, essays, tasks) = tokio::try_join!(
        state.store.list_colleges(params.user_id),
        state.store.list_essays(params.user_id),
        state.store.list_tasks(params.user_id),
    )?;

    let listing = colleges
        .into_iter()
        .map(|college| {
            let progress = estimate_progress(&college, &essays, &tasks);
            CollegeWithProgress { college, progress }
        })
        .collect();

    Ok(Json(listing))
}

/// POST /api/v1/colleges
pub async fn handle_create_college(
    State(state): State<AppState>,
    Json(request): Json<CreateCollegeRequest>,
) -> Result<(StatusCode, Json<CollegeRow>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if request.lors_required < 0 {
        return Err(AppError::Validation(
            "lors_required cannot be negative".to_string(),
        ));
    }

    let college = sqlx::query_as::<_, CollegeRow>(
        r#"
        INSERT INTO colleges
            (id, user_id, name, platform, deadline, deadline_type,
             test_policy, lors_required, portfolio_required, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'Not Started')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.user_id)
    .bind(request.name.trim())
    .bind(&request.platform)
    .bind(request.deadline)
    .bind(&request.deadline_type)
    .bind(&request.test_policy)
    .bind(request.lors_required)
    .bind(request.portfolio_required)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(college)))
}

/// PATCH /api/v1/colleges/:id
///
/// Partial update; only the provided fields change. Deadline edits are what
/// make a follow-up schedule sync reschedule the derived tasks.
pub async fn handle_update_college(
    State(state): State<AppState>,
    Path(college_id): Path<Uuid>,
    Json(request): Json<UpdateCollegeRequest>,
) -> Result<Json<CollegeRow>, AppError> {
    let college = sqlx::query_as::<_, CollegeRow>(
        r#"
        UPDATE colleges SET
            status = COALESCE($1, status),
            deadline = COALESCE($2, deadline),
            deadline_type = COALESCE($3, deadline_type),
            test_policy = COALESCE($4, test_policy),
            lors_required = COALESCE($5, lors_required),
            updated_at = NOW()
        WHERE id = $6 AND user_id = $7
        RETURNING *
        "#,
    )
    .bind(&request.status)
    .bind(request.deadline)
    .bind(&request.deadline_type)
    .bind(&request.test_policy)
    .bind(request.lors_required)
    .bind(college_id)
    .bind(request.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("College {college_id} not found")))?;

    Ok(Json(college))
}

/// DELETE /api/v1/colleges/:id
pub async fn handle_delete_college(
    State(state): State<AppState>,
    Path(college_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM colleges WHERE id = $1 AND user_id = $2")
        .bind(college_id)
        .bind(params.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("College {college_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
