//! Query log operations over the injected [`QueryStore`](aimode_db::store::QueryStore).
//!
//! Each service is built per request from the shared handle in `AppState`.
//! Validation happens here, before any store call.

pub mod aggregator;
pub mod reader;
pub mod writer;

pub use aggregator::StatsAggregator;
pub use reader::{Listing, QueryReader};
pub use writer::{QueryWriter, StoredQuery};
