use axum::{Json, extract::State};

use crate::service::ingest;
use crate::types::github::CommitPayload;
use crate::{PulseError, router::PulseState};

/// GET / -> static welcome payload.
pub async fn home() -> Json<&'static str> {
    Json("Welcome")
}

/// GET /commits -> run a full synchronization against the hosting API,
/// blocking the caller until paging completes. Responds with the
/// records of the last page fetched.
pub async fn sync_commits_handler(
    State(state): State<PulseState>,
) -> Result<Json<Vec<CommitPayload>>, PulseError> {
    let last_page = ingest::sync_commits(&state.store, &state.client, &state.target).await?;
    Ok(Json(last_page))
}
