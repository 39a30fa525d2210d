//! Detection of commits that are already recorded

use std::path::Path;

use tracing::{debug, instrument};

use chronicler_core::error::DocumentError;

use crate::document::ChangelogDocument;

/// Whether `message` already occurs anywhere in the changelog at `path`.
///
/// `message` is the raw commit summary, PR suffix included. The test is plain
/// substring containment over the whole document, every section included, so
/// a commit recorded in any earlier release is never added again. A message
/// that happens to be a substring of an unrelated line also counts as
/// recorded. A missing file contains nothing.
#[instrument(fields(path = %path.display()))]
pub fn is_entry_in_changelog(path: &Path, message: &str) -> Result<bool, DocumentError> {
    let found = match ChangelogDocument::load(path)? {
        Some(doc) => doc.contains(message),
        None => false,
    };
    debug!(found, "checked changelog for message");
    Ok(found)
}
