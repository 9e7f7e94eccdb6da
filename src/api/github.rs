use crate::error::PulseError;
use crate::types::github::{CommitPayload, WIRE_DATE_FORMAT};
use chrono::{DateTime, Utc};
use reqwest::header::AUTHORIZATION;
use url::Url;

/// Coordinates of the repository being synchronized, plus the token
/// used against its hosting API.
#[derive(Debug, Clone)]
pub struct RepoTarget {
    pub base_url: Url,
    pub owner: String,
    pub repo: String,
    pub token: String,
}

impl RepoTarget {
    pub fn new(
        base_url: Url,
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            base_url,
            owner: owner.into(),
            repo: repo.into(),
            token: token.into(),
        }
    }

    fn commits_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/commits",
            self.base_url.as_str().trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

pub struct GithubApi;

impl GithubApi {
    /// Fetch one page of the commit list, up to `per_page` records.
    pub async fn list_commits(
        client: &reqwest::Client,
        target: &RepoTarget,
        since: DateTime<Utc>,
        per_page: usize,
        page: u32,
    ) -> Result<Vec<CommitPayload>, PulseError> {
        let resp = client
            .get(target.commits_url())
            .header(AUTHORIZATION, format!("token {}", target.token))
            .query(&[
                ("since", since.format(WIRE_DATE_FORMAT).to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }
}
