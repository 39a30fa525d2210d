//! Core types for Chronicler

use serde::{Deserialize, Serialize};

/// The CI event that triggered a run, derived from a fully-qualified git ref
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum CiEvent {
    /// Push to a branch
    Branch(String),
    /// Push of a tag
    Tag(String),
    /// Anything else (pull request merge refs, notes, ...)
    Other(String),
}

impl CiEvent {
    /// Classify a ref such as `refs/heads/main` or `refs/tags/v1.2.0`
    pub fn from_ref(git_ref: &str) -> Self {
        if let Some(branch) = git_ref.strip_prefix("refs/heads/") {
            Self::Branch(branch.to_string())
        } else if let Some(tag) = git_ref.strip_prefix("refs/tags/") {
            Self::Tag(tag.to_string())
        } else {
            Self::Other(git_ref.to_string())
        }
    }

    /// Returns the short name of the ref
    pub fn name(&self) -> &str {
        match self {
            Self::Branch(name) | Self::Tag(name) | Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for CiEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Branch(name) => write!(f, "branch push ({})", name),
            Self::Tag(name) => write!(f, "tag push ({})", name),
            Self::Other(name) => write!(f, "unsupported ref ({})", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ref() {
        assert_eq!(
            CiEvent::from_ref("refs/heads/feature/login"),
            CiEvent::Branch("feature/login".to_string())
        );
        assert_eq!(
            CiEvent::from_ref("refs/tags/v1.2.0"),
            CiEvent::Tag("v1.2.0".to_string())
        );
        assert_eq!(
            CiEvent::from_ref("refs/pull/7/merge"),
            CiEvent::Other("refs/pull/7/merge".to_string())
        );
    }

    #[test]
    fn test_name() {
        assert_eq!(CiEvent::from_ref("refs/tags/v2.0.0").name(), "v2.0.0");
    }
}
