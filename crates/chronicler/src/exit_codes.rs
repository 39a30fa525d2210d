//! Exit codes for the CLI

#![allow(dead_code)]

use chronicler_core::error::{ChronicleError, ConfigError, DocumentError, GitError, PromotionError};

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Changelog could not be read or written
pub const DOCUMENT_ERROR: i32 = 4;

/// Promotion failed
pub const PROMOTION_ERROR: i32 = 5;

/// `check` did not find the message
pub const NOT_RECORDED: i32 = 1;

/// Map an error to the process exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ChronicleError>() {
        Some(ChronicleError::Config(_)) => CONFIG_ERROR,
        Some(ChronicleError::Git(_)) => GIT_ERROR,
        Some(ChronicleError::Document(_)) => DOCUMENT_ERROR,
        Some(ChronicleError::Promotion(_)) => PROMOTION_ERROR,
        Some(_) => ERROR,
        None if err.downcast_ref::<ConfigError>().is_some() => CONFIG_ERROR,
        None if err.downcast_ref::<GitError>().is_some() => GIT_ERROR,
        None if err.downcast_ref::<DocumentError>().is_some() => DOCUMENT_ERROR,
        None if err.downcast_ref::<PromotionError>().is_some() => PROMOTION_ERROR,
        None => ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_through_context() {
        let err: anyhow::Result<()> = Err(ChronicleError::from(PromotionError::HeaderNotFound {
            path: PathBuf::from("CHANGES.md"),
            header: "## Unreleased".to_string(),
        }))
        .context("release failed");
        assert_eq!(for_error(&err.unwrap_err()), PROMOTION_ERROR);
    }

    #[test]
    fn test_exit_code_for_config() {
        let err = anyhow::Error::from(ChronicleError::from(ConfigError::NotFound(
            PathBuf::from("."),
        )));
        assert_eq!(for_error(&err), CONFIG_ERROR);
        assert_eq!(for_error(&anyhow::anyhow!("other")), ERROR);
        assert_ne!(SUCCESS, ERROR);
    }

    #[test]
    fn test_exit_code_for_bare_document_error() {
        let err = anyhow::Error::from(DocumentError::Write {
            path: PathBuf::from("CHANGES.md"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        })
        .context("update failed");
        assert_eq!(for_error(&err), DOCUMENT_ERROR);
    }
}
