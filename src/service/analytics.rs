//! Read-only aggregate views over the commit store.
//!
//! The streak and heatmap views are computed here as linear scans over
//! plain rows rather than in SQL, keeping the store dialect-free.

use crate::db::sqlite::CommitStore;
use crate::error::PulseError;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

pub const DEFAULT_TOP: i64 = 5;

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommitterTally {
    pub author: Option<String>,
    pub commits: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuthorStreak {
    pub author: Option<String>,
    pub streak: i64,
}

/// One weekday of the hour-band heatmap, field names matching the
/// band labels.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeatmapRow {
    pub day_of_week: String,
    #[serde(rename = "01-03")]
    pub h01_03: i64,
    #[serde(rename = "04-06")]
    pub h04_06: i64,
    #[serde(rename = "07-09")]
    pub h07_09: i64,
    #[serde(rename = "10-12")]
    pub h10_12: i64,
    #[serde(rename = "13-15")]
    pub h13_15: i64,
    #[serde(rename = "16-18")]
    pub h16_18: i64,
    #[serde(rename = "19-21")]
    pub h19_21: i64,
    #[serde(rename = "22-00")]
    pub h22_00: i64,
}

impl HeatmapRow {
    fn new(day_of_week: &str, bands: [i64; 8]) -> Self {
        Self {
            day_of_week: day_of_week.to_string(),
            h01_03: bands[0],
            h04_06: bands[1],
            h07_09: bands[2],
            h10_12: bands[3],
            h13_15: bands[4],
            h16_18: bands[5],
            h19_21: bands[6],
            h22_00: bands[7],
        }
    }
}

/// Commit counts per author, descending, top `top` groups. Authors
/// that never resolved to an account form their own group.
pub async fn top_committers(
    store: &CommitStore,
    top: i64,
) -> Result<Vec<CommitterTally>, PulseError> {
    let rows = store.committer_counts(top).await?;
    Ok(rows
        .into_iter()
        .map(|(author, commits)| CommitterTally { author, commits })
        .collect())
}

/// Authors whose longest run of consecutive commit days equals the
/// global maximum, ordered by author name.
pub async fn longest_streaks(store: &CommitStore) -> Result<Vec<AuthorStreak>, PulseError> {
    let rows = store.author_dates().await?;
    Ok(compute_streaks(&rows))
}

/// Commit counts per (weekday, hour band). Weekdays with no commits at
/// all are absent; rows come out Monday first.
pub async fn heatmap(store: &CommitStore) -> Result<Vec<HeatmapRow>, PulseError> {
    let dates = store.commit_dates().await?;
    Ok(bucket_heatmap(&dates))
}

/// Linear scan over (author, date) pairs sorted by author then date,
/// carrying the previous author, previous day and running streak as
/// plain locals. Commits on the same calendar day collapse to one day;
/// a gap of exactly one day extends the run, anything else resets it.
fn compute_streaks(rows: &[(Option<String>, NaiveDateTime)]) -> Vec<AuthorStreak> {
    let mut best: Vec<(Option<String>, i64)> = Vec::new();
    let mut prev_author: Option<&Option<String>> = None;
    let mut prev_day: Option<NaiveDate> = None;
    let mut run = 0i64;

    for (author, date) in rows {
        let day = date.date();
        let same_author = prev_author == Some(author);

        if same_author && prev_day == Some(day) {
            continue;
        }

        if same_author && prev_day.is_some_and(|p| day - p == Duration::days(1)) {
            run += 1;
        } else {
            run = 1;
        }

        if same_author {
            if let Some(entry) = best.last_mut() {
                entry.1 = entry.1.max(run);
            }
        } else {
            best.push((author.clone(), run));
            prev_author = Some(author);
        }
        prev_day = Some(day);
    }

    let max = best.iter().map(|(_, streak)| *streak).max().unwrap_or(0);
    let mut winners: Vec<AuthorStreak> = best
        .into_iter()
        .filter(|(_, streak)| *streak == max)
        .map(|(author, streak)| AuthorStreak { author, streak })
        .collect();
    winners.sort_by(|a, b| a.author.cmp(&b.author));
    winners
}

fn bucket_heatmap(dates: &[NaiveDateTime]) -> Vec<HeatmapRow> {
    let mut counts = [[0i64; 8]; 7];
    let mut seen = [false; 7];

    for date in dates {
        let day = date.weekday().num_days_from_monday() as usize;
        counts[day][hour_band(date.hour())] += 1;
        seen[day] = true;
    }

    (0..7)
        .filter(|&day| seen[day])
        .map(|day| HeatmapRow::new(WEEKDAY_NAMES[day], counts[day]))
        .collect()
}

/// Band index for an hour of day. Hours 22, 23 and midnight share the
/// wrap-around `22-00` band.
fn hour_band(hour: u32) -> usize {
    match hour {
        1..=3 => 0,
        4..=6 => 1,
        7..=9 => 2,
        10..=12 => 3,
        13..=15 => 4,
        16..=18 => 5,
        19..=21 => 6,
        _ => 7,
    }
}
