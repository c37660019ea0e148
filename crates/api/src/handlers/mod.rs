//! Request handlers.
//!
//! Handlers extract request data, build the matching service from the shared
//! store handle and wrap the result in a response envelope. Errors are mapped
//! via [`AppError`](crate::error::AppError).

pub mod fallback;
pub mod queries;
pub mod stats;
