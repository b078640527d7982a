pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;
use crate::{colleges, essays, progress, schedule, tasks};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Colleges
        .route(
            "/api/v1/colleges",
            get(colleges::handlers::handle_list_colleges)
                .post(colleges::handlers::handle_create_college),
        )
        .route(
            "/api/v1/colleges/:id",
            patch(colleges::handlers::handle_update_college)
                .delete(colleges::handlers::handle_delete_college),
        )
        .route(
            "/api/v1/colleges/:id/progress",
            get(progress::handlers::handle_college_progress),
        )
        .route(
            "/api/v1/analytics/summary",
            get(progress::handlers::handle_analytics_summary),
        )
        // Essays
        .route(
            "/api/v1/essays",
            get(essays::handlers::handle_list_essays).post(essays::handlers::handle_create_essay),
        )
        .route(
            "/api/v1/essays/:id",
            patch(essays::handlers::handle_save_essay),
        )
        // Tasks
        .route(
            "/api/v1/tasks",
            get(tasks::handlers::handle_list_tasks).post(tasks::handlers::handle_create_task),
        )
        .route(
            "/api/v1/tasks/:id/complete",
            patch(tasks::handlers::handle_complete_task),
        )
        // Schedule synchronizer
        .route(
            "/api/v1/schedule/sync",
            post(schedule::handlers::handle_sync),
        )
        .with_state(state)
}
