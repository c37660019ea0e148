//! Row types and DTOs for the `queries` table.

pub mod query_record;
