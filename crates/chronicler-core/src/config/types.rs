//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for Chronicler
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Changelog document configuration
    pub changelog: ChangelogConfig,

    /// Git configuration
    pub git: GitConfig,

    /// GitHub configuration
    pub github: GitHubConfig,
}

/// Changelog document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub file: PathBuf,

    /// Literal header line of the pending section
    pub unreleased_header: String,

    /// Header template for promoted sections (`{version}`, `{date}`)
    pub version_header: String,

    /// Title used when seeding a new changelog
    pub title: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("./CHANGES.md"),
            unreleased_header: "## Unreleased".to_string(),
            version_header: "## [{version}] - {date}".to_string(),
            title: "# Changelog".to_string(),
        }
    }
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote name
    pub remote: String,

    /// Branch that receives the promoted changelog on tag events
    pub branch: String,

    /// Message used for changelog commits
    pub commit_message: String,

    /// Whether to push after committing
    pub push: bool,

    /// Committer name, left to git's own config when unset
    pub user_name: Option<String>,

    /// Committer email, left to git's own config when unset
    pub user_email: Option<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "main".to_string(),
            commit_message: "docs: update changelog [skip ci]".to_string(),
            push: true,
            user_name: None,
            user_email: None,
        }
    }
}

/// GitHub configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL
    pub api_url: String,

    /// Repository slug (owner/name)
    pub repository: Option<String>,

    /// Whether to look up PR numbers remotely when the message has none
    pub resolve_pull_requests: bool,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            repository: None,
            resolve_pull_requests: true,
        }
    }
}
