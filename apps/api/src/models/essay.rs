use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An application essay. `college_id` is None for global essays such as the
/// personal statement.
///
/// `word_count` is derived from `content` at save time and never accepted as
/// client input. `is_completed` is one-way: once set it is never auto-unset.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EssayRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub college_id: Option<Uuid>,
    pub title: String,
    pub essay_type: String,
    pub prompt: Option<String>,
    pub word_limit: Option<i32>,
    pub content: String,
    pub word_count: i32,
    pub is_completed: bool,
    pub version: i32,
    /// The parent college's deadline, populated by the store via join at
    /// fetch time. The synchronizer reads this field and nothing else about
    /// how the join was produced.
    pub college_deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Computes the word count persisted alongside essay content.
pub fn count_words(content: &str) -> i32 {
    content.split_whitespace().count() as i32
}
