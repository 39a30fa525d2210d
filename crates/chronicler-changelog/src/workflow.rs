//! Driver-side helpers for the branch-push and tag-push paths

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument};

use chronicler_core::error::ChronicleError;
use chronicler_git::CommitInfo;

use crate::document::ChangelogDocument;
use crate::entry::CommitEntry;
use crate::formatter::format_version_header;
use crate::promote::{get_unreleased_content, promote_with_template};

/// Commits that still need a changelog line, oldest first.
///
/// `commits` is expected most recent first, as the commit source returns
/// them. Merge commits, commits whose summary equals one of `ignore` (the
/// tool's own changelog commits) and commits whose summary already appears
/// in `document` are dropped. Summaries are compared with surrounding
/// whitespace removed, as rendered entries never carry it. A summary
/// repeated within the batch is only kept once.
pub fn new_commits<'a>(
    document: &ChangelogDocument,
    commits: &'a [CommitInfo],
    ignore: &[&str],
) -> Vec<&'a CommitInfo> {
    let mut seen = HashSet::new();
    let pending: Vec<&CommitInfo> = commits
        .iter()
        .rev()
        .filter(|c| !c.is_merge())
        .filter(|c| !ignore.iter().any(|i| i.trim() == c.message.trim()))
        .filter(|c| !document.contains(c.message.trim()))
        .filter(|c| seen.insert(c.message.trim()))
        .collect();

    debug!(
        total = commits.len(),
        pending = pending.len(),
        "filtered commits against changelog"
    );
    pending
}

/// Turn commits into entries.
///
/// A PR reference in the summary wins; otherwise `remote_prs` (keyed by
/// full commit hash) is consulted.
pub fn build_entries(
    commits: &[&CommitInfo],
    remote_prs: &HashMap<String, u64>,
) -> Vec<CommitEntry> {
    commits
        .iter()
        .map(|c| {
            let mut entry = CommitEntry::from_raw(&c.message, &c.author);
            if entry.pr_number.is_none() {
                entry.pr_number = remote_prs.get(&c.hash).copied();
            }
            entry
        })
        .collect()
}

/// Outcome of a release run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReleaseOutcome {
    /// The Unreleased section was sealed under `version_header`
    Promoted {
        version_header: String,
        content: String,
    },
    /// Nothing was pending; the document was left alone
    NothingToRelease,
}

/// Promote the Unreleased section for `version` unless it is empty
#[instrument(fields(path = %path.display()))]
pub fn release(
    path: &Path,
    unreleased_header: &str,
    template: &str,
    version: &str,
    date: &str,
) -> Result<ReleaseOutcome, ChronicleError> {
    let Some(content) = get_unreleased_content(path, unreleased_header)? else {
        info!(version, "no unreleased changes, skipping promotion");
        return Ok(ReleaseOutcome::NothingToRelease);
    };

    promote_with_template(path, version, date, unreleased_header, template)?;

    Ok(ReleaseOutcome::Promoted {
        version_header: format_version_header(template, version, date),
        content,
    })
}
