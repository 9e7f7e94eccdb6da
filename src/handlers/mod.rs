pub mod analytics;
pub mod commits;
