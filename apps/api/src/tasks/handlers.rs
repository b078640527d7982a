//! Axum route handlers for tasks. User-authored tasks and system-generated
//! ones share the same table; the synchronizer tells them apart by title.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::task::TaskRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub user_id: Uuid,
    pub college_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_category() -> String {
    "General".to_string()
}

fn default_priority() -> String {
    "Medium".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CompleteTaskRequest {
    pub user_id: Uuid,
}

/// GET /api/v1/tasks
pub async fn handle_list_tasks(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<TaskRow>>, AppError> {
    Ok(Json(state.store.list_tasks(params.user_id).await?))
}

/// POST /api/v1/tasks
pub async fn handle_create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskRow>), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let task = sqlx::query_as::<_, TaskRow>(
        r#"
        INSERT INTO tasks
            (id, user_id, college_id, title, description, due_date,
             category, priority, completed)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.user_id)
    .bind(request.college_id)
    .bind(request.title.trim())
    .bind(&request.description)
    .bind(request.due_date)
    .bind(&request.category)
    .bind(&request.priority)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/v1/tasks/:id/complete
///
/// One-way transition; once completed the row is frozen and the schedule
/// synchronizer will never move its due date again.
pub async fn handle_complete_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(request): Json<CompleteTaskRequest>,
) -> Result<Json<TaskRow>, AppError> {
    let task = sqlx::query_as::<_, TaskRow>(
        r#"
        UPDATE tasks SET completed = TRUE, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(task_id)
    .bind(request.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Task {task_id} not found")))?;

    Ok(Json(task))
}
