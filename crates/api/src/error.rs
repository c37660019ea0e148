use std::any::Any;
use std::sync::OnceLock;

use aimode_core::error::CoreError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Message sent in place of internal error detail outside development.
pub const GENERIC_FAULT_MESSAGE: &str = "Something went wrong";

/// Whether 500 responses carry the underlying error text.
static EXPOSE_DETAILS: OnceLock<bool> = OnceLock::new();

/// Fix whether internal error detail is included in 500 responses.
///
/// Only the first call takes effect; later calls return `false` if they asked
/// for a different value. Detail stays hidden until this is called.
pub fn set_expose_details(enabled: bool) -> bool {
    *EXPOSE_DETAILS.get_or_init(|| enabled) == enabled
}

fn expose_details() -> bool {
    EXPOSE_DETAILS.get().copied().unwrap_or(false)
}

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds storage and HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses with an `error` field and a machine-readable `code`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `aimode_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store fault while performing `action`.
    #[error("{action}: {source}")]
    Storage {
        action: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A malformed request body.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No handler matches the method and path.
    #[error("Route not found")]
    RouteNotFound,

    /// Anything else, including recovered panics.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Adapter for `map_err` that tags a store error with what was being done.
    pub fn storage(action: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |source| AppError::Storage { action, source }
    }

    /// Status code and JSON body for this error.
    ///
    /// `expose_details` controls whether 500 responses include the underlying
    /// error text.
    pub fn to_parts(&self, expose_details: bool) -> (StatusCode, serde_json::Value) {
        let detail = |text: String| {
            if expose_details {
                text
            } else {
                GENERIC_FAULT_MESSAGE.to_string()
            }
        };

        match self {
            AppError::Core(CoreError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg, "code": "VALIDATION_ERROR" }),
            ),
            AppError::Core(CoreError::Internal(msg)) | AppError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Internal server error",
                    "code": "INTERNAL_ERROR",
                    "message": detail(msg.clone()),
                }),
            ),
            AppError::Storage { action, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": action,
                    "code": "STORAGE_ERROR",
                    "message": detail(source.to_string()),
                }),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg, "code": "BAD_REQUEST" }),
            ),
            AppError::RouteNotFound => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "Not found",
                    "code": "NOT_FOUND",
                    "message": "The requested endpoint does not exist",
                }),
            ),
        }
    }

    fn log(&self) {
        match self {
            AppError::Core(CoreError::Validation(msg)) | AppError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Rejected request");
            }
            AppError::Storage { action, source } => {
                tracing::error!(error = %source, action, "Storage error");
            }
            AppError::Core(CoreError::Internal(msg)) | AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Unhandled error");
            }
            AppError::RouteNotFound => tracing::debug!("No route matched"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let (status, body) = self.to_parts(expose_details());
        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Panic handler for `CatchPanicLayer`: shapes the panic as an unhandled fault.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::InternalError(format!("handler panicked: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::Core(CoreError::Validation("uid is required".into()));
        let (status, body) = err.to_parts(false);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "uid is required");
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[test]
    fn storage_detail_is_hidden_by_default() {
        let err = AppError::Storage {
            action: "Failed to fetch queries",
            source: sqlx::Error::PoolTimedOut,
        };
        let (status, body) = err.to_parts(false);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch queries");
        assert_eq!(body["code"], "STORAGE_ERROR");
        assert_eq!(body["message"], GENERIC_FAULT_MESSAGE);
    }

    #[test]
    fn storage_detail_is_exposed_in_development() {
        let err = AppError::Storage {
            action: "Failed to store query",
            source: sqlx::Error::PoolTimedOut,
        };
        let (_, body) = err.to_parts(true);
        assert!(body["message"].as_str().unwrap().contains("pool timed out"));
    }

    #[test]
    fn storage_adapter_keeps_action() {
        let err = Err::<(), _>(sqlx::Error::PoolClosed)
            .map_err(AppError::storage("Failed to fetch statistics"))
            .unwrap_err();
        assert!(matches!(err, AppError::Storage { action: "Failed to fetch statistics", .. }));
    }

    #[test]
    fn route_not_found_maps_to_404() {
        let (status, body) = AppError::RouteNotFound.to_parts(false);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
        assert_eq!(body["message"], "The requested endpoint does not exist");
    }

    #[test]
    fn internal_error_is_sanitized() {
        let err = AppError::InternalError("secret connection string".into());
        let (status, body) = err.to_parts(false);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(!body.to_string().contains("secret"));
    }

    #[test]
    fn panic_payload_becomes_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
