//! Structured commit records

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Trailing pull-request reference such as `Fix crash (#42)`.
///
/// Only the exact ` (#N)` form is matched, with the message neither starting
/// nor ending in whitespace. That is the form `format_entry` writes back, so
/// the raw summary stays a substring of the rendered line.
static PR_SUFFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<message>\S(?:.*\S)?) \(#(?P<number>\d+)\)$").expect("Invalid regex")
});

/// One change to record in the changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEntry {
    /// Commit summary with any PR reference suffix removed
    pub message: String,
    /// Author name
    pub author: String,
    /// Associated pull request
    pub pr_number: Option<u64>,
}

impl CommitEntry {
    /// Create an entry without a PR reference
    pub fn new(message: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            author: author.into(),
            pr_number: None,
        }
    }

    /// Build an entry from a raw commit summary, lifting a trailing `(#N)`
    /// into `pr_number`
    pub fn from_raw(raw_message: &str, author: impl Into<String>) -> Self {
        let (message, pr_number) = split_pr_reference(raw_message);
        Self {
            message,
            author: author.into(),
            pr_number,
        }
    }

    /// Set the PR number
    pub fn with_pr_number(mut self, pr_number: u64) -> Self {
        self.pr_number = Some(pr_number);
        self
    }
}

/// Split a trailing ` (#N)` off a commit summary.
///
/// `N` must be a positive integer, separated from a non-empty message by
/// exactly one space; otherwise the message is returned untouched.
pub fn split_pr_reference(raw: &str) -> (String, Option<u64>) {
    if let Some(caps) = PR_SUFFIX_REGEX.captures(raw) {
        if let Some(number) = caps["number"].parse::<u64>().ok().filter(|&n| n > 0) {
            return (caps["message"].to_string(), Some(number));
        }
    }
    (raw.to_string(), None)
}
