use crate::api::github::{GithubApi, RepoTarget};
use crate::db::models::CommitRow;
use crate::db::sqlite::CommitStore;
use crate::error::PulseError;
use crate::types::github::CommitPayload;
use chrono::{Duration, Utc};
use tracing::info;

pub const PAGE_SIZE: usize = 100;
pub const LOOKBACK_DAYS: i64 = 180;

/// Pull every commit newer than the lookback window and upsert it into
/// the store, one transaction per page.
///
/// Paging continues while the previous page came back full, so a
/// dataset that is an exact multiple of the page size costs one final
/// request that returns zero records. Network and decode errors abort
/// the run; pages already committed stay persisted.
///
/// Returns the record set of the last page fetched.
pub async fn sync_commits(
    store: &CommitStore,
    client: &reqwest::Client,
    target: &RepoTarget,
) -> Result<Vec<CommitPayload>, PulseError> {
    let since = Utc::now() - Duration::days(LOOKBACK_DAYS);

    let mut page = 1u32;
    let mut commits: Vec<CommitPayload>;

    loop {
        commits = GithubApi::list_commits(client, target, since, PAGE_SIZE, page).await?;
        if commits.is_empty() {
            break;
        }

        let rows = commits
            .iter()
            .map(CommitRow::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        store.upsert_page(&rows).await?;
        info!(page, records = rows.len(), "commit page persisted");

        if commits.len() < PAGE_SIZE {
            break;
        }
        page += 1;
    }

    info!(last_page = page, "commit synchronization finished");
    Ok(commits)
}
