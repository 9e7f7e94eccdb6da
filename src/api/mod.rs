pub mod github;

pub use github::{GithubApi, RepoTarget};
