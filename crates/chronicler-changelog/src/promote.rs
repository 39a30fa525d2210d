//! Promotion of the Unreleased section into a release section
//!
//! Promotion is a one-way transition: the pending section's header becomes a
//! dated release header with its body untouched, and an empty Unreleased
//! header is put back above it for the next cycle.

use std::path::Path;

use tracing::{debug, info, instrument};

use chronicler_core::error::{ChronicleError, PromotionError};

use crate::document::ChangelogDocument;
use crate::formatter::format_version_header;

/// Default template for release headers
pub const DEFAULT_VERSION_HEADER: &str = "## [{version}] - {date}";

impl ChangelogDocument {
    /// Trimmed body of the Unreleased section, `None` when the header is
    /// missing or the body is blank
    pub fn unreleased_content(&self, header: &str) -> Option<String> {
        let index = self.find_header(header)?;
        let content = self.section_body(index).join("\n").trim().to_string();
        if content.is_empty() {
            None
        } else {
            Some(content)
        }
    }

    /// Turn the Unreleased header into `version_header` and insert a fresh
    /// Unreleased header above it. Returns `false` when there is no
    /// Unreleased header.
    pub fn promote_unreleased(&mut self, header: &str, version_header: &str) -> bool {
        let Some(index) = self.find_header(header) else {
            return false;
        };

        // reuse the existing header line verbatim for the new pending section
        let pending = self.line(index).unwrap_or(header).to_string();
        self.replace_line(index, version_header);
        self.insert_lines(index, [pending, String::new()]);
        debug!(index, version_header, "promoted unreleased section");
        true
    }
}

/// Read the Unreleased section body from the changelog at `path`.
///
/// Returns `None` for a missing file, a missing header or a blank section.
#[instrument(fields(path = %path.display()))]
pub fn get_unreleased_content(
    path: &Path,
    unreleased_header: &str,
) -> Result<Option<String>, ChronicleError> {
    let content = ChangelogDocument::load(path)?
        .and_then(|doc| doc.unreleased_content(unreleased_header));
    debug!(has_content = content.is_some(), "read unreleased content");
    Ok(content)
}

/// Promote the Unreleased section of the changelog at `path` to a release
/// section headed `## [<version>] - <date>`.
#[instrument(fields(path = %path.display()))]
pub fn promote_unreleased_to_version(
    path: &Path,
    version: &str,
    date: &str,
    unreleased_header: &str,
) -> Result<(), ChronicleError> {
    promote_with_template(path, version, date, unreleased_header, DEFAULT_VERSION_HEADER)
}

/// Like [`promote_unreleased_to_version`] with a custom header template
/// containing `{version}` and `{date}`
#[instrument(fields(path = %path.display()))]
pub fn promote_with_template(
    path: &Path,
    version: &str,
    date: &str,
    unreleased_header: &str,
    template: &str,
) -> Result<(), ChronicleError> {
    let header_not_found = || PromotionError::HeaderNotFound {
        path: path.to_path_buf(),
        header: unreleased_header.to_string(),
    };

    let mut doc = ChangelogDocument::load(path)?.ok_or_else(header_not_found)?;

    let version_header = format_version_header(template, version, date);
    if !doc.promote_unreleased(unreleased_header, &version_header) {
        return Err(header_not_found().into());
    }

    doc.save(path)?;
    info!(version, date, "promoted unreleased section");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "## Unreleased";

    const PENDING: &str = "# Changelog\n\n## Unreleased\n- fix: crash by Bob\n\n## [1.0.0] - 2024-01-01\n- Initial release by Alice\n";

    fn write_doc(text: &str) -> (TempDir, std::path::PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CHANGES.md");
        std::fs::write(&path, text).unwrap();
        (temp, path)
    }

    #[test]
    fn test_promote_scenario() {
        let (_temp, path) = write_doc(PENDING);

        promote_unreleased_to_version(&path, "v1.1.0", "2024-02-01", HEADER).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# Changelog\n\n## Unreleased\n\n## [v1.1.0] - 2024-02-01\n- fix: crash by Bob\n\n## [1.0.0] - 2024-01-01\n- Initial release by Alice\n"
        );
    }

    #[test]
    fn test_promotion_moves_lines_exactly() {
        let mut doc = ChangelogDocument::parse(
            "## Unreleased\n- a by A\n- b (#2) by B\n\n### Notes\ntext\n",
        );
        let before = doc.unreleased_content(HEADER).unwrap();

        assert!(doc.promote_unreleased(HEADER, "## [2.0.0] - 2024-05-05"));

        let released = doc.find_header("## [2.0.0] - 2024-05-05").unwrap();
        assert_eq!(
            doc.section_body(released).join("\n").trim(),
            before.as_str()
        );
        assert_eq!(doc.unreleased_content(HEADER), None);
        assert_eq!(doc.find_header(HEADER), Some(0));
    }

    #[test]
    fn test_promotion_keeps_custom_header_line() {
        let mut doc = ChangelogDocument::parse("# Log\n\n## Unreleased  \r\n- a by A\r\n");
        assert!(doc.promote_unreleased(HEADER, "## [1.0.0] - 2024-01-01"));
        assert_eq!(
            doc.render(),
            "# Log\n\n## Unreleased  \r\n\r\n## [1.0.0] - 2024-01-01\r\n- a by A\r\n"
        );
    }

    #[test]
    fn test_promote_custom_template() {
        let (_temp, path) = write_doc("## Unreleased\n- a by A\n");
        promote_with_template(&path, "3.0.0", "2024-06-01", HEADER, "## {version} ({date})")
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "## Unreleased\n\n## 3.0.0 (2024-06-01)\n- a by A\n"
        );
    }

    #[test]
    fn test_promote_without_header_fails() {
        let (_temp, path) = write_doc("# Changelog\n\n## [1.0.0] - 2024-01-01\n- x by Y\n");
        let err = promote_unreleased_to_version(&path, "v1.1.0", "2024-02-01", HEADER)
            .unwrap_err();
        assert!(matches!(
            err,
            ChronicleError::Promotion(PromotionError::HeaderNotFound { .. })
        ));
        // untouched
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# Changelog\n\n## [1.0.0] - 2024-01-01\n- x by Y\n"
        );
    }

    #[test]
    fn test_promote_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("CHANGES.md");
        let err = promote_unreleased_to_version(&path, "v1", "2024-01-01", HEADER).unwrap_err();
        assert!(matches!(err, ChronicleError::Promotion(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_get_unreleased_content() {
        let (_temp, path) = write_doc(PENDING);
        assert_eq!(
            get_unreleased_content(&path, HEADER).unwrap(),
            Some("- fix: crash by Bob".to_string())
        );
    }

    #[test]
    fn test_get_unreleased_content_empty_or_missing() {
        let (_temp, path) = write_doc("# Changelog\n\n## Unreleased\n\n\n## [1.0.0]\n- x by Y\n");
        assert_eq!(get_unreleased_content(&path, HEADER).unwrap(), None);

        let (_temp2, path2) = write_doc("# Changelog\n");
        assert_eq!(get_unreleased_content(&path2, HEADER).unwrap(), None);

        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("CHANGES.md");
        assert_eq!(get_unreleased_content(&missing, HEADER).unwrap(), None);
    }
}
