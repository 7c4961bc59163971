//! Practice history endpoints

use axum::{extract::State, Extension, Json};

use practice_core::StatsAggregator;

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/stats
///
/// Fetched history plus whatever the caller's live sessions have not pushed yet.
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<StatsResponse>> {
    let snapshot = state.api.fetch_stats(&auth.token).await?;
    let mut aggregator = StatsAggregator::from_snapshot(snapshot);
    for submission in state.sessions.pending_for(&auth.token).await {
        aggregator.include_unsent(submission);
    }
    Ok(Json(aggregator.display()))
}

/// DELETE /api/stats
pub async fn reset(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ResetStatsResponse>> {
    let sessions_cleared = state.sessions.reset_history(&auth.token).await?;
    tracing::info!("Reset practice history ({} live sessions cleared)", sessions_cleared);

    Ok(Json(ResetStatsResponse {
        reset: true,
        sessions_cleared,
    }))
}
