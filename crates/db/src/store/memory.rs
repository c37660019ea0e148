use std::collections::{HashMap, HashSet};

use aimode_core::pagination::Page;
use aimode_core::search::search_regex;
use aimode_core::types::Timestamp;
use async_trait::async_trait;
use regex::Regex;
use tokio::sync::RwLock;

use super::QueryStore;
use crate::models::query_record::{NewQueryRecord, QueryRecord, TopQuery};

/// In-process [`QueryStore`] with the same ordering and filter semantics as
/// the PostgreSQL implementation.
#[derive(Default)]
pub struct MemoryQueryStore {
    records: RwLock<Vec<QueryRecord>>,
}

impl MemoryQueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored record in insertion order.
    pub async fn snapshot(&self) -> Vec<QueryRecord> {
        self.records.read().await.clone()
    }

    async fn sorted_where(&self, keep: impl Fn(&QueryRecord) -> bool) -> Vec<QueryRecord> {
        let mut matching: Vec<QueryRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|&r| keep(r))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        matching
    }
}

fn window(records: Vec<QueryRecord>, page: Page) -> Vec<QueryRecord> {
    records
        .into_iter()
        .skip(usize::try_from(page.skip).unwrap_or(0))
        .take(usize::try_from(page.limit).unwrap_or(0))
        .collect()
}

/// Compile the optional search filter. Invalid patterns surface as a store
/// error, as PostgreSQL reports them.
fn search_filter(search: Option<&str>) -> Result<Option<Regex>, sqlx::Error> {
    search
        .map(search_regex)
        .transpose()
        .map_err(|e| sqlx::Error::Protocol(e.to_string()))
}

#[async_trait]
impl QueryStore for MemoryQueryStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn insert(&self, record: &NewQueryRecord) -> Result<QueryRecord, sqlx::Error> {
        let mut records = self.records.write().await;
        let stored = QueryRecord {
            id: records.len() as i64 + 1,
            uid: record.uid.clone(),
            query: record.query.clone(),
            full_url: record.full_url.clone(),
            timestamp: record.timestamp,
            created_at: record.created_at,
            ip_hash: record.ip_hash.clone(),
        };
        records.push(stored.clone());
        Ok(stored)
    }

    async fn list_by_uid(&self, uid: &str, page: Page) -> Result<Vec<QueryRecord>, sqlx::Error> {
        Ok(window(self.sorted_where(|r| r.uid == uid).await, page))
    }

    async fn count_by_uid(&self, uid: &str) -> Result<i64, sqlx::Error> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| r.uid == uid).count() as i64)
    }

    async fn list(
        &self,
        search: Option<&str>,
        page: Page,
    ) -> Result<Vec<QueryRecord>, sqlx::Error> {
        let filter = search_filter(search)?;
        let matching = self
            .sorted_where(|r| filter.as_ref().map_or(true, |re| re.is_match(&r.query)))
            .await;
        Ok(window(matching, page))
    }

    async fn count(&self, search: Option<&str>) -> Result<i64, sqlx::Error> {
        let filter = search_filter(search)?;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| filter.as_ref().map_or(true, |re| re.is_match(&r.query)))
            .count() as i64)
    }

    async fn count_distinct_uids(&self) -> Result<i64, sqlx::Error> {
        let records = self.records.read().await;
        let uids: HashSet<&str> = records.iter().map(|r| r.uid.as_str()).collect();
        Ok(uids.len() as i64)
    }

    async fn count_created_since(&self, since: Timestamp) -> Result<i64, sqlx::Error> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| r.created_at >= since).count() as i64)
    }

    async fn top_queries(&self, limit: i64) -> Result<Vec<TopQuery>, sqlx::Error> {
        let records = self.records.read().await;
        let mut groups: HashMap<&str, TopQuery> = HashMap::new();
        for record in records.iter() {
            groups
                .entry(record.query.as_str())
                .and_modify(|group| {
                    group.count += 1;
                    group.last_seen = group.last_seen.max(record.timestamp);
                })
                .or_insert_with(|| TopQuery {
                    query: record.query.clone(),
                    count: 1,
                    last_seen: record.timestamp,
                });
        }

        let mut top: Vec<TopQuery> = groups.into_values().collect();
        top.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then(b.last_seen.cmp(&a.last_seen))
                .then(a.query.cmp(&b.query))
        });
        top.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(top)
    }
}
