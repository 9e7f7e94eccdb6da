use crate::error::PulseError;
use crate::types::github::{CommitPayload, WIRE_DATE_FORMAT};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format of the `commits.date` column.
pub const STORE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommitRow {
    pub sha: String,
    pub committer: i64,
    pub message: String,
    pub date: NaiveDateTime,
    pub author: Option<String>,
}

impl TryFrom<&CommitPayload> for CommitRow {
    type Error = PulseError;

    fn try_from(payload: &CommitPayload) -> Result<Self, Self::Error> {
        let date = NaiveDateTime::parse_from_str(&payload.commit.author.date, WIRE_DATE_FORMAT)?;
        Ok(Self {
            sha: payload.sha.clone(),
            committer: payload.committer.id,
            message: payload.commit.message.clone(),
            date,
            author: payload.author_login().map(str::to_owned),
        })
    }
}
