//! Domain logic for the AI mode query log.
//!
//! Nothing in this crate performs I/O. The storage layer (`aimode-db`) and the
//! HTTP layer (`aimode-api`) both build on these types and helpers.

pub mod error;
pub mod hashing;
pub mod pagination;
pub mod query_event;
pub mod search;
pub mod stats;
pub mod types;
