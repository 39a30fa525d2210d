//! Rendering of changelog lines

use crate::entry::CommitEntry;

/// Render one entry as a changelog line.
///
/// `- <message> (#<pr>) by <author>`, or `- <message> by <author>` without a
/// PR. The PR reference sits right after the message so that the raw
/// commit summary `<message> (#<pr>)` appears verbatim in the line.
pub fn format_entry(entry: &CommitEntry) -> String {
    let message = single_line(&entry.message);
    let author = single_line(&entry.author);

    match entry.pr_number {
        Some(pr) => format!("- {} (#{}) by {}", message, pr, author),
        None => format!("- {} by {}", message, author),
    }
}

/// Render a release header from a template containing `{version}` and `{date}`
pub fn format_version_header(template: &str, version: &str, date: &str) -> String {
    template
        .replace("{version}", &single_line(version))
        .replace("{date}", &single_line(date))
}

/// Join the non-blank lines of `text` with single spaces
fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_without_pr() {
        let entry = CommitEntry::new("fix: crash", "Bob");
        assert_eq!(format_entry(&entry), "- fix: crash by Bob");
    }

    #[test]
    fn test_format_with_pr_contains_raw_summary() {
        let entry = CommitEntry::from_raw("fix: null pointer (#42)", "Jane");
        let line = format_entry(&entry);
        assert_eq!(line, "- fix: null pointer (#42) by Jane");
        assert!(line.contains("fix: null pointer (#42)"));
    }

    #[test]
    fn test_format_never_emits_newlines() {
        let entry = CommitEntry::new("first line\r\nsecond line\n", "Multi\nLine");
        let line = format_entry(&entry);
        assert_eq!(line, "- first line second line by Multi Line");
        assert!(!line.contains('\n') && !line.contains('\r'));
    }

    #[test]
    fn test_format_version_header() {
        assert_eq!(
            format_version_header("## [{version}] - {date}", "v1.1.0", "2024-02-01"),
            "## [v1.1.0] - 2024-02-01"
        );
        assert_eq!(
            format_version_header("## {version} ({date})", "2.0.0", "2024-03-05"),
            "## 2.0.0 (2024-03-05)"
        );
    }
}
