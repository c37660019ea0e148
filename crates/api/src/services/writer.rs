use std::sync::Arc;

use aimode_core::hashing::ip_hash;
use aimode_core::query_event::{masked_uid, preview, QueryEventInput};
use aimode_core::types::{DbId, Timestamp};
use aimode_db::models::query_record::NewQueryRecord;
use aimode_db::store::QueryStore;
use chrono::Utc;

use crate::error::{AppError, AppResult};

/// Characters of the query text included in the "stored" log line.
const LOG_PREVIEW_CHARS: usize = 50;

/// Identity of a newly stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredQuery {
    pub id: DbId,
    pub created_at: Timestamp,
}

/// Validates incoming events and appends them to the store.
pub struct QueryWriter {
    store: Arc<dyn QueryStore>,
}

impl QueryWriter {
    pub fn new(store: Arc<dyn QueryStore>) -> Self {
        Self { store }
    }

    /// Validate, normalize and persist one event.
    ///
    /// `caller_address` feeds the truncated `ip_hash`; `None` stores null.
    pub async fn store(
        &self,
        input: QueryEventInput,
        caller_address: Option<&str>,
    ) -> AppResult<StoredQuery> {
        let event = input.into_event()?;

        let record = NewQueryRecord {
            uid: event.uid,
            query: event.query,
            full_url: event.full_url,
            timestamp: event.timestamp,
            created_at: Utc::now(),
            ip_hash: ip_hash(caller_address),
        };

        let stored = self
            .store
            .insert(&record)
            .await
            .map_err(AppError::storage("Failed to store query"))?;

        tracing::info!(
            id = stored.id,
            query = %preview(&stored.query, LOG_PREVIEW_CHARS),
            uid = %masked_uid(&stored.uid),
            "Query stored",
        );

        Ok(StoredQuery {
            id: stored.id,
            created_at: stored.created_at,
        })
    }
}
