//! Chronicler Changelog - Commit-driven changelog maintenance
//!
//! This crate owns the changelog document model: locating sections,
//! detecting already-recorded commits, appending entries to the Unreleased
//! section and promoting that section into a dated release.

pub mod document;
pub mod duplicate;
pub mod entry;
pub mod formatter;
pub mod promote;
pub mod unreleased;
pub mod workflow;

pub use document::{ChangelogDocument, DEFAULT_TITLE};
pub use duplicate::is_entry_in_changelog;
pub use entry::{split_pr_reference, CommitEntry};
pub use formatter::{format_entry, format_version_header};
pub use promote::{
    get_unreleased_content, promote_unreleased_to_version, promote_with_template,
    DEFAULT_VERSION_HEADER,
};
pub use unreleased::add_to_unreleased;
pub use workflow::{build_entries, new_commits, release, ReleaseOutcome};
