use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::response::StatsResponse;
use crate::services::StatsAggregator;
use crate::state::AppState;

/// GET /api/stats
///
/// Totals, unique users, windowed counts and the ten most frequent queries.
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<StatsResponse>> {
    let stats = StatsAggregator::new(state.store.clone())
        .compute_stats()
        .await?;

    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}
