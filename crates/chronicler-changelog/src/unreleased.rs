//! Appending entries to the Unreleased section

use std::path::Path;

use tracing::{debug, info, instrument};

use chronicler_core::error::DocumentError;

use crate::document::{heading_level, ChangelogDocument, DEFAULT_TITLE};
use crate::entry::CommitEntry;
use crate::formatter::format_entry;

impl ChangelogDocument {
    /// Locate the Unreleased header, creating it when absent.
    ///
    /// A new header goes in front of the first heading that follows the
    /// title (or the first heading at all when there is no title), which
    /// puts it above every release section. Returns the header index and
    /// whether it was created.
    pub fn ensure_unreleased(&mut self, header: &str) -> (usize, bool) {
        if let Some(index) = self.find_header(header) {
            return (index, false);
        }

        let at = match self.title_index() {
            Some(title) => self.next_heading(title).unwrap_or(self.len()),
            None => {
                if self.line(0).is_some_and(|l| heading_level(l).is_some()) {
                    0
                } else {
                    self.next_heading(0).unwrap_or(self.len())
                }
            }
        };

        let mut lines = Vec::new();
        let needs_gap_above = at > 0 && self.line(at - 1).is_some_and(|l| !l.trim().is_empty());
        if needs_gap_above {
            lines.push(String::new());
        }
        lines.push(header.trim().to_string());
        if at < self.len() {
            lines.push(String::new());
        }

        let index = at + usize::from(needs_gap_above);
        self.insert_lines(at, lines);
        debug!(index, "created unreleased header");
        (index, true)
    }

    /// Append formatted entries after the existing Unreleased content, in
    /// the order given. Returns whether the document changed.
    ///
    /// Entries go in front of the first heading below the Unreleased header,
    /// so a trailing `###` subsection keeps only its own lines.
    pub fn append_entries(&mut self, header: &str, entries: &[CommitEntry]) -> bool {
        let (index, created) = self.ensure_unreleased(header);
        if entries.is_empty() {
            return created;
        }

        let end = self.next_heading(index).unwrap_or(self.len());
        let at = self.content_end(index, end);

        let mut lines: Vec<String> = entries.iter().map(format_entry).collect();
        // keep a blank line between the new entries and a following heading
        if at == end && end < self.len() {
            lines.push(String::new());
        }

        self.insert_lines(at, lines);
        debug!(count = entries.len(), at, "appended entries");
        true
    }
}

/// Add `entries` to the Unreleased section of the changelog at `path`.
///
/// A missing changelog is created with a default title. The file is only
/// rewritten when something changed, and then as a whole.
#[instrument(skip(entries), fields(path = %path.display(), count = entries.len()))]
pub fn add_to_unreleased(
    path: &Path,
    entries: &[CommitEntry],
    unreleased_header: &str,
) -> Result<(), DocumentError> {
    let existing = ChangelogDocument::load(path)?;
    let is_new = existing.is_none();
    let mut doc = existing.unwrap_or_else(|| ChangelogDocument::seeded(DEFAULT_TITLE));

    let changed = doc.append_entries(unreleased_header, entries);
    if !changed && !is_new {
        debug!("changelog unchanged, skipping write");
        return Ok(());
    }

    doc.save(path)?;
    info!(count = entries.len(), "updated unreleased section");
    Ok(())
}
