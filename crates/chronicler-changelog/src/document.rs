//! Line-indexed changelog document
//!
//! The document is kept as the raw sequence of lines it was read from.
//! Sections are never materialized; they are located on demand by matching
//! header lines, so anything the automation does not touch is written back
//! byte for byte.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use chronicler_core::error::DocumentError;

/// Title used when a changelog has to be created from scratch
pub const DEFAULT_TITLE: &str = "# Changelog";

/// A changelog held in memory as an ordered sequence of lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogDocument {
    /// Raw lines without their `\n` terminator (a CRLF `\r` stays attached)
    lines: Vec<String>,
    crlf: bool,
    trailing_newline: bool,
}

impl ChangelogDocument {
    /// Parse raw document text
    pub fn parse(text: &str) -> Self {
        let crlf = text.contains("\r\n");
        let (body, trailing_newline) = match text.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (text, false),
        };

        let lines = if text.is_empty() {
            Vec::new()
        } else {
            body.split('\n').map(str::to_string).collect()
        };

        Self {
            lines,
            crlf,
            trailing_newline,
        }
    }

    /// A fresh document holding only a title line
    pub fn seeded(title: &str) -> Self {
        Self::parse(&format!("{}\n", title))
    }

    /// Read a document from disk. A missing file yields `None`.
    #[instrument(fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Option<Self>, DocumentError> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                debug!(bytes = text.len(), "read changelog");
                Ok(Some(Self::parse(&text)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("changelog does not exist yet");
                Ok(None)
            }
            Err(source) => Err(DocumentError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Read a document from disk, seeding a new one with `title` if missing
    pub fn load_or_seed(path: &Path, title: &str) -> Result<Self, DocumentError> {
        Ok(Self::load(path)?.unwrap_or_else(|| Self::seeded(title)))
    }

    /// Replace the file at `path` with this document.
    ///
    /// The text goes to a temporary file in the same directory which is then
    /// renamed over the target, so readers see either the old or the new
    /// document and never a partial write.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let write_err = |source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(&dir).map_err(write_err)?;
        let text = self.render();
        file.write_all(text.as_bytes()).map_err(write_err)?;
        file.as_file().sync_all().map_err(write_err)?;

        // the temp file is created private; keep the target's mode instead
        if let Ok(metadata) = std::fs::metadata(path) {
            file.as_file()
                .set_permissions(metadata.permissions())
                .map_err(write_err)?;
        }
        file.persist(path).map_err(|e| write_err(e.error))?;

        debug!(bytes = text.len(), "wrote changelog");
        Ok(())
    }

    /// Serialize back to text
    pub fn render(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines at all
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line content at `index`, without any line terminator
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|l| l.trim_end_matches('\r'))
    }

    /// Whether `text` occurs anywhere in the document
    pub fn contains(&self, text: &str) -> bool {
        self.render().contains(text)
    }

    /// Index of the first line equal to `header` after trimming both sides
    pub fn find_header(&self, header: &str) -> Option<usize> {
        let header = header.trim();
        self.lines.iter().position(|l| l.trim() == header)
    }

    /// Index of the line that ends the section starting at `start`.
    ///
    /// A section runs until the next heading of the same or a higher level
    /// (fewer `#`), or the end of the document. If the line at `start` is not
    /// a markdown heading, any heading ends it.
    pub fn section_end(&self, start: usize) -> usize {
        let level = self.lines.get(start).and_then(|l| heading_level(l));

        self.lines
            .iter()
            .enumerate()
            .skip(start + 1)
            .find(|(_, line)| match (heading_level(line), level) {
                (Some(found), Some(own)) => found <= own,
                (Some(_), None) => true,
                (None, _) => false,
            })
            .map(|(i, _)| i)
            .unwrap_or(self.lines.len())
    }

    /// Index just past the last non-blank line of the section body
    /// `start..end`, or `start + 1` when the body is blank
    pub fn content_end(&self, start: usize, end: usize) -> usize {
        (start + 1..end)
            .rev()
            .find(|&i| !self.lines[i].trim().is_empty())
            .map(|i| i + 1)
            .unwrap_or(start + 1)
    }

    /// Body lines of the section headed at `start`, header excluded
    pub fn section_body(&self, start: usize) -> Vec<&str> {
        let end = self.section_end(start);
        (start + 1..end).filter_map(|i| self.line(i)).collect()
    }

    /// Index of the top-level title: a level-1 heading that comes before
    /// every other heading
    pub fn title_index(&self) -> Option<usize> {
        self.lines
            .iter()
            .enumerate()
            .find_map(|(i, l)| heading_level(l).map(|level| (i, level)))
            .filter(|&(_, level)| level == 1)
            .map(|(i, _)| i)
    }

    /// Index of the first heading after `index`, if any
    pub fn next_heading(&self, index: usize) -> Option<usize> {
        (index + 1..self.lines.len()).find(|&i| heading_level(&self.lines[i]).is_some())
    }

    /// Insert `lines` before position `at`, using the document's line style
    pub fn insert_lines<I, S>(&mut self, at: usize, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.lines.is_empty() {
            self.trailing_newline = true;
        }
        let crlf = self.crlf;
        let new: Vec<String> = lines
            .into_iter()
            .map(|l| {
                let mut l = l.into();
                if crlf {
                    l.push('\r');
                }
                l
            })
            .collect();
        self.lines.splice(at..at, new);
    }

    /// Replace the content of line `index`, keeping its terminator style
    pub fn replace_line(&mut self, index: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(index) {
            let cr = line.ends_with('\r');
            *line = text.to_string();
            if cr {
                line.push('\r');
            }
        }
    }
}

impl std::fmt::Display for ChangelogDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Markdown ATX heading level of a line (`## x` is 2), if it is a heading
///
/// Up to three spaces of indentation are allowed; deeper indentation is an
/// indented code block.
pub fn heading_level(line: &str) -> Option<usize> {
    let unindented = line.trim_start_matches(' ');
    if line.len() - unindented.len() > 3 {
        return None;
    }
    let line = unindented.trim_end();
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    match line[level..].chars().next() {
        None => Some(level),
        Some(c) if c.is_whitespace() => Some(level),
        Some(_) => None,
    }
}
