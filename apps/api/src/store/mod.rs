//! Data Store collaborator — the only surface through which the schedule
//! synchronizer reads and writes application data.
//!
//! Carried in `AppState` as `Arc<dyn ApplicationStore>` so handlers and the
//! synchronizer stay ignorant of the backing database; tests swap in an
//! in-memory implementation.

pub mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::college::CollegeRow;
use crate::models::essay::EssayRow;
use crate::models::task::{TaskCategory, TaskPriority, TaskRow};

/// A task staged for insertion by the synchronizer.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub user_id: Uuid,
    pub college_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub category: TaskCategory,
    pub priority: TaskPriority,
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn list_colleges(&self, user_id: Uuid) -> Result<Vec<CollegeRow>, AppError>;

    /// Essays joined with their parent college's deadline
    /// (`EssayRow::college_deadline`).
    async fn list_essays(&self, user_id: Uuid) -> Result<Vec<EssayRow>, AppError>;

    async fn list_tasks(&self, user_id: Uuid) -> Result<Vec<TaskRow>, AppError>;

    /// Inserts all staged tasks as one batch write.
    async fn insert_tasks(&self, tasks: &[NewTask]) -> Result<(), AppError>;

    /// Rewrites the due date of a single task row.
    async fn update_task_due_date(&self, task_id: Uuid, due: NaiveDate) -> Result<(), AppError>;
}
