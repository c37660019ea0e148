use crate::error::AppError;

/// Catch-all for unknown paths and unsupported methods on known paths.
pub async fn not_found() -> AppError {
    AppError::RouteNotFound
}
