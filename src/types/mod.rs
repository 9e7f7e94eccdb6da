pub mod github;

pub use github::CommitPayload;
