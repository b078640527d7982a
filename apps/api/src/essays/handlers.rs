//! Axum route handlers for essays.
//!
//! Two write-path invariants live here: `word_count` is always derived from
//! the submitted content, never accepted from the client, and
//! `is_completed` only ever transitions false -> true.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::essay::{count_words, EssayRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateEssayRequest {
    pub user_id: Uuid,
    pub college_id: Option<Uuid>,
    pub title: String,
    #[serde(default = "default_essay_type")]
    pub essay_type: String,
    pub prompt: Option<String>,
    pub word_limit: Option<i32>,
}

fn default_essay_type() -> String {
    "supplemental".to_string()
}

#[derive(Debug, Deserialize)]
pub struct SaveEssayRequest {
    pub user_id: Uuid,
    pub content: Option<String>,
    pub is_completed: Option<bool>,
}

/// GET /api/v1/essays
pub async fn handle_list_essays(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<EssayRow>>, AppError> {
    Ok(Json(state.store.list_essays(params.user_id).await?))
}

/// POST /api/v1/essays
pub async fn handle_create_essay(
    State(state): State<AppState>,
    Json(request): Json<CreateEssayRequest>,
) -> Result<(StatusCode, Json<EssayRow>), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let essay_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO essays
            (id, user_id, college_id, title, essay_type, prompt, word_limit,
             content, word_count, is_completed, version)
        VALUES ($1, $2, $3, $4, $5, $6, $7, '', 0, FALSE, 1)
        "#,
    )
    .bind(essay_id)
    .bind(request.user_id)
    .bind(request.college_id)
    .bind(request.title.trim())
    .bind(&request.essay_type)
    .bind(&request.prompt)
    .bind(request.word_limit)
    .execute(&state.db)
    .await?;

    let essay = fetch_essay(&state, essay_id, request.user_id).await?;
    Ok((StatusCode::CREATED, Json(essay)))
}

/// PATCH /api/v1/essays/:id
///
/// Autosave/manual save. Sending `is_completed: false` for an already
/// completed essay is a no-op rather than an un-complete.
pub async fn handle_save_essay(
    State(state): State<AppState>,
    Path(essay_id): Path<Uuid>,
    Json(request): Json<SaveEssayRequest>,
) -> Result<Json<EssayRow>, AppError> {
    let word_count = request.content.as_deref().map(count_words);

    let result = sqlx::query(
        r#"
        UPDATE essays SET
            content = COALESCE($1, content),
            word_count = COALESCE($2, word_count),
            is_completed = is_completed OR COALESCE($3, FALSE),
            version = version + 1,
            updated_at = NOW()
        WHERE id = $4 AND user_id = $5
        "#,
    )
    .bind(&request.content)
    .bind(word_count)
    .bind(request.is_completed)
    .bind(essay_id)
    .bind(request.user_id)
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Essay {essay_id} not found")));
    }

    let essay = fetch_essay(&state, essay_id, request.user_id).await?;
    Ok(Json(essay))
}

/// Re-reads one essay through the deadline join so responses always carry
/// `college_deadline`.
async fn fetch_essay(state: &AppState, essay_id: Uuid, user_id: Uuid) -> Result<EssayRow, AppError> {
    sqlx::query_as::<_, EssayRow>(
        r#"
        SELECT e.*, c.deadline AS college_deadline
        FROM essays e
        LEFT JOIN colleges c ON c.id = e.college_id
        WHERE e.id = $1 AND e.user_id = $2
        "#,
    )
    .bind(essay_id)
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Essay {essay_id} not found")))
}
