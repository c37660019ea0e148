use std::sync::Arc;

use aimode_core::pagination::{Page, DEFAULT_ALL_LIMIT, DEFAULT_USER_LIMIT};
use aimode_core::query_event::validate_uid;
use aimode_core::search::{normalize_search, search_regex};
use aimode_db::models::query_record::{RedactedQueryView, UserQueryView};
use aimode_db::store::QueryStore;

use crate::error::{AppError, AppResult};

/// One page of records plus the size of the full (filtered) set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    pub records: Vec<T>,
    pub total: i64,
}

impl<T> Listing<T> {
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Paginated, projected reads over stored records.
pub struct QueryReader {
    store: Arc<dyn QueryStore>,
}

impl QueryReader {
    pub fn new(store: Arc<dyn QueryStore>) -> Self {
        Self { store }
    }

    /// Records for exactly `uid`, newest first, without uid or ip hash.
    ///
    /// `total` counts every record of the uid regardless of the window.
    pub async fn list_by_user(
        &self,
        uid: &str,
        limit: Option<&str>,
        skip: Option<&str>,
    ) -> AppResult<Listing<UserQueryView>> {
        validate_uid(uid)?;
        let page = Page::parse(limit, skip, DEFAULT_USER_LIMIT)?;

        let (records, total) = tokio::try_join!(
            self.store.list_by_uid(uid, page),
            self.store.count_by_uid(uid),
        )
        .map_err(AppError::storage("Failed to fetch queries"))?;

        Ok(Listing {
            records: records.into_iter().map(UserQueryView::from).collect(),
            total,
        })
    }

    /// Records across all users, newest first, with uids cut to a prefix.
    ///
    /// `search` is a case-insensitive regular expression; a blank one means no
    /// filter and an invalid one is rejected before the store is touched.
    /// `total` counts the filtered set.
    pub async fn list_all(
        &self,
        limit: Option<&str>,
        skip: Option<&str>,
        search: Option<&str>,
    ) -> AppResult<Listing<RedactedQueryView>> {
        let page = Page::parse(limit, skip, DEFAULT_ALL_LIMIT)?;
        let search = normalize_search(search);
        if let Some(pattern) = search {
            search_regex(pattern)?;
        }

        let (records, total) = tokio::try_join!(
            self.store.list(search, page),
            self.store.count(search),
        )
        .map_err(AppError::storage("Failed to fetch queries"))?;

        Ok(Listing {
            records: records.into_iter().map(RedactedQueryView::from).collect(),
            total,
        })
    }
}
