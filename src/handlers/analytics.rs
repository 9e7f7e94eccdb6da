use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::service::analytics::{self, AuthorStreak, CommitterTally, HeatmapRow};
use crate::{PulseError, router::PulseState};

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub top: Option<i64>,
}

/// GET /committers?top=N -> the N most active authors, default 5.
/// Values below 1 are rejected before the store is touched.
pub async fn top_committers_handler(
    State(state): State<PulseState>,
    Query(query): Query<TopQuery>,
) -> Result<Json<Vec<CommitterTally>>, PulseError> {
    let top = query.top.unwrap_or(analytics::DEFAULT_TOP);
    if top < 1 {
        return Err(PulseError::InvalidParameter(format!(
            "`top` must be at least 1, got {top}"
        )));
    }
    Ok(Json(analytics::top_committers(&state.store, top).await?))
}

/// GET /committers/streak -> authors holding the longest run of
/// consecutive commit days.
pub async fn streak_handler(
    State(state): State<PulseState>,
) -> Result<Json<Vec<AuthorStreak>>, PulseError> {
    Ok(Json(analytics::longest_streaks(&state.store).await?))
}

/// GET /commits/heatmap -> weekday x hour-band commit counts.
pub async fn heatmap_handler(
    State(state): State<PulseState>,
) -> Result<Json<Vec<HeatmapRow>>, PulseError> {
    Ok(Json(analytics::heatmap(&state.store).await?))
}
