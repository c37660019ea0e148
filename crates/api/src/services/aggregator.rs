use std::sync::Arc;

use aimode_core::stats::{StatsWindows, TOP_QUERIES_LIMIT};
use aimode_db::models::query_record::QueryStats;
use aimode_db::store::QueryStore;

use crate::error::{AppError, AppResult};

/// Recomputes collection-wide analytics on every call.
pub struct StatsAggregator {
    store: Arc<dyn QueryStore>,
}

impl StatsAggregator {
    pub fn new(store: Arc<dyn QueryStore>) -> Self {
        Self { store }
    }

    pub async fn compute_stats(&self) -> AppResult<QueryStats> {
        self.compute_with_windows(StatsWindows::now_local()).await
    }

    /// Counts run narrowest window first so that inserts landing mid-call
    /// cannot break `today <= week <= total`.
    pub async fn compute_with_windows(&self, windows: StatsWindows) -> AppResult<QueryStats> {
        let failed = || AppError::storage("Failed to fetch statistics");

        let today_queries = self
            .store
            .count_created_since(windows.today_start)
            .await
            .map_err(failed())?;
        let week_queries = self
            .store
            .count_created_since(windows.week_start)
            .await
            .map_err(failed())?;
        let total_queries = self.store.count(None).await.map_err(failed())?;
        let unique_users = self.store.count_distinct_uids().await.map_err(failed())?;
        let top_queries = self
            .store
            .top_queries(TOP_QUERIES_LIMIT)
            .await
            .map_err(failed())?;

        Ok(QueryStats {
            total_queries,
            unique_users,
            today_queries,
            week_queries,
            top_queries,
        })
    }
}
