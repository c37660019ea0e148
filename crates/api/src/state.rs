use std::sync::Arc;

use aimode_db::store::QueryStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The single storage handle shared by every request.
    pub store: Arc<dyn QueryStore>,
    /// Server configuration (read by extractors and the middleware stack).
    pub config: Arc<ServerConfig>,
}
