use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A target institution in the user's application list.
///
/// `deadline` is a calendar date with no time component; it anchors every
/// due date the schedule synchronizer derives for this college.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CollegeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    /// Application platform, e.g. "Common App", "UC Application".
    pub platform: String,
    pub deadline: Option<NaiveDate>,
    /// Deadline round: "RD", "EA", "ED", "UC", ...
    pub deadline_type: String,
    /// "Required", "Optional", "Test-Blind". The synchronizer only emits the
    /// test-score task when at least one college reports "Required".
    pub test_policy: String,
    pub lors_required: i32,
    pub portfolio_required: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
