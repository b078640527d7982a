use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::college::CollegeRow;
use crate::models::essay::EssayRow;
use crate::models::task::TaskRow;
use crate::store::{ApplicationStore, NewTask};

/// PostgreSQL-backed store used in production.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationStore for PgStore {
    async fn list_colleges(&self, user_id: Uuid) -> Result<Vec<CollegeRow>, AppError> {
        Ok(sqlx::query_as::<_, CollegeRow>(
            "SELECT * FROM colleges WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_essays(&self, user_id: Uuid) -> Result<Vec<EssayRow>, AppError> {
        // The joined deadline lands in EssayRow::college_deadline; global
        // essays (college_id IS NULL) carry NULL through the LEFT JOIN.
        Ok(sqlx::query_as::<_, EssayRow>(
            r#"
            SELECT e.*, c.deadline AS college_deadline
            FROM essays e
            LEFT JOIN colleges c ON c.id = e.college_id
            WHERE e.user_id = $1
            ORDER BY e.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_tasks(&self, user_id: Uuid) -> Result<Vec<TaskRow>, AppError> {
        Ok(sqlx::query_as::<_, TaskRow>(
            "SELECT * FROM tasks WHERE user_id = $1 ORDER BY due_date ASC NULLS LAST",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn insert_tasks(&self, tasks: &[NewTask]) -> Result<(), AppError> {
        if tasks.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let mut builder = QueryBuilder::new(
            "INSERT INTO tasks \
             (id, user_id, college_id, title, description, due_date, \
              category, priority, completed, created_at, updated_at) ",
        );
        builder.push_values(tasks, |mut row, task| {
            row.push_bind(Uuid::new_v4())
                .push_bind(task.user_id)
                .push_bind(task.college_id)
                .push_bind(&task.title)
                .push_bind(&task.description)
                .push_bind(task.due_date)
                .push_bind(task.category.as_str())
                .push_bind(task.priority.as_str())
                .push_bind(false)
                .push_bind(now)
                .push_bind(now);
        });
        builder.build().execute(&self.pool).await?;
        Ok(())
    }

    async fn update_task_due_date(&self, task_id: Uuid, due: NaiveDate) -> Result<(), AppError> {
        sqlx::query("UPDATE tasks SET due_date = $1, updated_at = $2 WHERE id = $3")
            .bind(due)
            .bind(Utc::now())
            .bind(task_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
