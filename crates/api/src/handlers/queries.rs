//! Handlers for recording and listing query events.

use aimode_core::query_event::{masked_uid, QueryEventInput};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::extract::{AppJson, CallerAddress};
use crate::query::{ListQueriesParams, PageParams};
use crate::response::{QueriesResponse, StoredResponse, UserQueriesResponse};
use crate::services::{QueryReader, QueryWriter};
use crate::state::AppState;

/// POST /api/ai-search
///
/// Record one search-query event from the browser extension.
pub async fn record_query(
    State(state): State<AppState>,
    CallerAddress(address): CallerAddress,
    AppJson(input): AppJson<QueryEventInput>,
) -> AppResult<impl IntoResponse> {
    let stored = QueryWriter::new(state.store.clone())
        .store(input, address.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(StoredResponse {
            success: true,
            id: stored.id,
            timestamp: stored.created_at,
        }),
    ))
}

/// GET /api/queries/{uid}
///
/// List one user's records, newest first.
pub async fn list_user_queries(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<UserQueriesResponse>> {
    let listing = QueryReader::new(state.store.clone())
        .list_by_user(&uid, params.limit.as_deref(), params.skip.as_deref())
        .await?;

    let count = listing.count();
    Ok(Json(UserQueriesResponse {
        success: true,
        queries: listing.records,
        total: listing.total,
        count,
        uid: masked_uid(&uid),
    }))
}

/// GET /api/queries
///
/// List or search records across all users with redacted uids.
pub async fn list_queries(
    State(state): State<AppState>,
    Query(params): Query<ListQueriesParams>,
) -> AppResult<Json<QueriesResponse>> {
    let listing = QueryReader::new(state.store.clone())
        .list_all(
            params.limit.as_deref(),
            params.skip.as_deref(),
            params.search.as_deref(),
        )
        .await?;

    tracing::debug!(
        search = ?params.search,
        total = listing.total,
        count = listing.count(),
        "Queries listed",
    );

    let count = listing.count();
    Ok(Json(QueriesResponse {
        success: true,
        queries: listing.records,
        total: listing.total,
        count,
    }))
}
