//! Route definitions for the query log API.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{queries, stats};
use crate::state::AppState;

/// Query log routes.
///
/// ```text
/// POST /api/ai-search          -> record_query
/// GET  /api/queries            -> list_queries
/// GET  /api/queries/{uid}      -> list_user_queries
/// GET  /api/stats              -> get_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/ai-search", post(queries::record_query))
        .route("/api/queries", get(queries::list_queries))
        .route("/api/queries/{uid}", get(queries::list_user_queries))
        .route("/api/stats", get(stats::get_stats))
}
