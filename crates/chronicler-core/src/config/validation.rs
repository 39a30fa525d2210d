//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changelog(config)?;
    validate_git(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.unreleased_header.trim().is_empty() {
        return Err(invalid("changelog.unreleased_header", "header cannot be empty"));
    }

    for placeholder in ["{version}", "{date}"] {
        if !config.changelog.version_header.contains(placeholder) {
            return Err(invalid(
                "changelog.version_header",
                &format!("must contain {} placeholder", placeholder),
            ));
        }
    }

    if config.changelog.file.as_os_str().is_empty() {
        return Err(invalid("changelog.file", "file cannot be empty"));
    }

    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.is_empty() {
        return Err(invalid("git.remote", "remote cannot be empty"));
    }

    if config.git.branch.is_empty() {
        return Err(invalid("git.branch", "branch cannot be empty"));
    }

    if config.git.commit_message.trim().is_empty() {
        return Err(invalid("git.commit_message", "commit message cannot be empty"));
    }

    Ok(())
}

fn invalid(field: &str, message: &str) -> crate::error::ChronicleError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_version_header_placeholders() {
        let mut config = Config::default();
        config.changelog.version_header = "## {version}".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_remote() {
        let mut config = Config::default();
        config.git.remote = String::new();
        assert!(validate_config(&config).is_err());
    }
}
