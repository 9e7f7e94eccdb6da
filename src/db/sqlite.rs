use crate::db::models::{CommitRow, STORE_DATE_FORMAT};
use crate::db::schema::SQLITE_INIT;
use crate::error::PulseError;
use chrono::NaiveDateTime;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct CommitStore {
    pool: SqlitePool,
}

impl CommitStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database behind `database_url` and
    /// return a pooled store.
    pub async fn connect(database_url: &str) -> Result<Self, PulseError> {
        let connect_opts =
            SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), PulseError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Upsert one page of commits inside a single transaction, so a
    /// failed ingestion run loses at most the page in flight.
    ///
    /// Keyed by `sha`; an existing row has all mutable fields replaced
    /// unconditionally (last write wins).
    pub async fn upsert_page(&self, rows: &[CommitRow]) -> Result<(), PulseError> {
        let mut tx = self.pool.begin().await?;

        for row in rows {
            let date = row.date.format(STORE_DATE_FORMAT).to_string();
            sqlx::query(
                r#"
                INSERT INTO commits (sha, committer, message, date, author)
                VALUES (?, ?, ?, ?, ?)
                ON CONFLICT(sha) DO UPDATE SET
                    committer=excluded.committer,
                    message=excluded.message,
                    date=excluded.date,
                    author=excluded.author
                "#,
            )
            .bind(&row.sha)
            .bind(row.committer)
            .bind(&row.message)
            .bind(date)
            .bind(&row.author)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn get_by_sha(&self, sha: &str) -> Result<CommitRow, PulseError> {
        let row = sqlx::query("SELECT sha, committer, message, date, author FROM commits WHERE sha = ?")
            .bind(sha)
            .fetch_one(&self.pool)
            .await?;
        Self::row_to_model(row)
    }

    pub async fn count(&self) -> Result<i64, PulseError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM commits")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    /// Commit counts grouped by author, descending, top `limit` groups.
    /// NULL authors group together; ordering among tied groups is
    /// whatever the engine returns.
    pub async fn committer_counts(
        &self,
        limit: i64,
    ) -> Result<Vec<(Option<String>, i64)>, PulseError> {
        let rows = sqlx::query(
            r#"SELECT author, COUNT(*) AS number_of_commits
               FROM commits
               GROUP BY author
               ORDER BY number_of_commits DESC
               LIMIT ?"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|row| {
                let author: Option<String> = row.try_get("author")?;
                let count: i64 = row.try_get("number_of_commits")?;
                Ok((author, count))
            })
            .collect()
    }

    /// Every (author, date) pair ordered by author then date. The TEXT
    /// timestamp column sorts chronologically.
    pub async fn author_dates(&self) -> Result<Vec<(Option<String>, NaiveDateTime)>, PulseError> {
        let rows = sqlx::query("SELECT author, date FROM commits ORDER BY author, date")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|row| {
                let author: Option<String> = row.try_get("author")?;
                let date = Self::parse_store_date(row.try_get("date")?)?;
                Ok((author, date))
            })
            .collect()
    }

    pub async fn commit_dates(&self) -> Result<Vec<NaiveDateTime>, PulseError> {
        let rows = sqlx::query("SELECT date FROM commits")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|row| Self::parse_store_date(row.try_get("date")?))
            .collect()
    }

    fn row_to_model(row: SqliteRow) -> Result<CommitRow, PulseError> {
        let sha: String = row.try_get("sha")?;
        let committer: i64 = row.try_get("committer")?;
        let message: String = row.try_get("message")?;
        let date = Self::parse_store_date(row.try_get("date")?)?;
        let author: Option<String> = row.try_get("author")?;

        Ok(CommitRow {
            sha,
            committer,
            message,
            date,
            author,
        })
    }

    fn parse_store_date(raw: String) -> Result<NaiveDateTime, PulseError> {
        NaiveDateTime::parse_from_str(&raw, STORE_DATE_FORMAT)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)).into())
    }
}
