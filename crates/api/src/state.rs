use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable; it holds only the connection pool and the
/// read-only configuration. Request handling itself is stateless.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: streamlay_db::DbPool,
    /// Server configuration, immutable after startup.
    pub config: Arc<ServerConfig>,
}
