//! SQL DDL for initializing the commit store.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `sha` TEXT PRIMARY KEY (one row per unique commit hash)
/// - `date` TEXT, local second-precision timestamp `YYYY-MM-DD HH:MM:SS`
/// - `author` nullable (login may not resolve upstream)
/// - index on `author` for the grouped analytics
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS commits (
    sha TEXT PRIMARY KEY,
    committer INTEGER NOT NULL,
    message TEXT NOT NULL,
    date TEXT NOT NULL,
    author TEXT NULL
);

CREATE INDEX IF NOT EXISTS idx_commits_author ON commits(author);
"#;
