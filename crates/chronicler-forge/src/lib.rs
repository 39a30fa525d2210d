//! Chronicler Forge - Pull request lookups
//!
//! Resolves the pull request a commit arrived through when its message does
//! not carry a `(#N)` reference.

pub mod github;
mod lookup;

pub use github::GitHubClient;
pub use lookup::{resolve_pull_requests, PullRequestLookup};
