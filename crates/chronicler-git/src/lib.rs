//! Chronicler Git - Git operations for changelog automation
//!
//! This crate provides the commit source, tag resolution and the
//! commit/push sink used to publish changelog updates.

mod commits;
mod remote;
mod repository;
mod status;
mod tags;
pub mod types;

pub use remote::{commit_and_push, PublishOptions};
pub use repository::{GitRepo, Result};
pub use types::CommitInfo;
