use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable. Holds no mutable data: all state lives in the database.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: orderdesk_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
}
