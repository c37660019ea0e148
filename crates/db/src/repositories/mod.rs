//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod query_record_repo;

pub use query_record_repo::QueryRecordRepo;
