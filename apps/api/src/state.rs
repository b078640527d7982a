use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::store::ApplicationStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Kept for handlers that need runtime settings beyond the pool.
    #[allow(dead_code)]
    pub config: Config,
    /// Data store collaborator. Production wires in `PgStore`; tests swap in
    /// an in-memory implementation.
    pub store: Arc<dyn ApplicationStore>,
}
