use std::sync::Arc;

use cliphub_storage::MediaStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cliphub_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Remote media store. A trait object so tests can substitute a mock.
    pub media_store: Arc<dyn MediaStore>,
}
