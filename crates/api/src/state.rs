use std::sync::Arc;

use coursehub_db::ordering::OrderingMode;

use crate::cache::SubjectCache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: coursehub_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Single-key cache for the public subject catalog.
    pub subject_cache: Arc<SubjectCache>,
}

impl AppState {
    /// The ordering mode used for module and content inserts.
    pub fn ordering_mode(&self) -> OrderingMode {
        self.config.ordering_mode()
    }
}
