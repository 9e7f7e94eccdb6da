use axum::{Router, routing::get};

use crate::api::github::RepoTarget;
use crate::db::sqlite::CommitStore;
use crate::handlers::{analytics, commits};

#[derive(Clone)]
pub struct PulseState {
    pub store: CommitStore,
    pub client: reqwest::Client,
    pub target: RepoTarget,
}

impl PulseState {
    pub fn new(store: CommitStore, client: reqwest::Client, target: RepoTarget) -> Self {
        Self {
            store,
            client,
            target,
        }
    }
}

pub fn pulse_router(state: PulseState) -> Router {
    Router::new()
        .route("/", get(commits::home))
        .route("/commits", get(commits::sync_commits_handler))
        .route("/commits/heatmap", get(analytics::heatmap_handler))
        .route("/committers", get(analytics::top_committers_handler))
        .route("/committers/streak", get(analytics::streak_handler))
        .with_state(state)
}
