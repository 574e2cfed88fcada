use std::sync::Arc;

use salon_core::validation::ValidationContext;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and the config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: salon_db::DbPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: salon_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    /// Validation context for a request arriving now.
    pub fn validation_context(&self) -> ValidationContext {
        ValidationContext::current(self.config.business_utc_offset)
    }
}
