use serde::{Deserialize, Serialize};

/// Timestamp format of the hosting API (`commit.author.date` and the
/// `since` query parameter).
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One element of the commit list returned by
/// `GET /repos/{owner}/{repo}/commits`.
///
/// Only the fields this service persists are modeled; everything else
/// in the upstream payload is ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitPayload {
    pub sha: String,
    /// Account the commit is attributed to; null or absent when the
    /// author e-mail does not resolve to an account.
    #[serde(default)]
    pub author: Option<AuthorAccount>,
    pub committer: CommitterAccount,
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorAccount {
    #[serde(default)]
    pub login: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitterAccount {
    pub id: i64,
}

/// Nested `commit` object carrying the git-level metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    pub author: CommitSignature,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSignature {
    /// ISO-8601 UTC, fixed format `YYYY-MM-DDTHH:MM:SSZ`.
    pub date: String,
}

impl CommitPayload {
    /// Author login, when the upstream resolved one.
    pub fn author_login(&self) -> Option<&str> {
        self.author.as_ref().and_then(|a| a.login.as_deref())
    }
}
