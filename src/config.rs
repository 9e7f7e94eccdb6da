use figment::{Figment, providers::Env};
use serde::Deserialize;
use std::sync::LazyLock;
use url::Url;

/// Process configuration, pulled from the environment (`.env` is loaded
/// by `main` before first access). Required keys missing at startup are
/// a deployment error and abort the process.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Repository owner, e.g. `rust-lang`.
    pub repo_owner: String,
    /// Repository name, e.g. `cargo`.
    pub repo_name: String,
    /// Source-control API base, e.g. `https://api.github.com`.
    pub base_url: Url,
    /// API access token, sent as `Authorization: token ..`.
    pub token: String,
    /// sqlx database URL, e.g. `sqlite:commit-pulse.sqlite`.
    pub database_url: String,
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Figment::new()
        .merge(Env::raw())
        .extract()
        .unwrap_or_else(|e| panic!("invalid configuration: {e}"))
});
