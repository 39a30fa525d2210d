//! Effective settings: flags and environment over config file over defaults

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use chronicler_core::config::{load_config, load_config_or_default, Config};
use chronicler_core::error::ConfigError;

use super::Cli;

/// Settings shared by all commands
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory the command runs in
    pub workdir: PathBuf,
    /// Loaded configuration
    pub config: Config,
    /// Configuration file that was used, if any
    pub config_path: Option<PathBuf>,
    /// Changelog file, resolved against `workdir`
    pub changelog: PathBuf,
    /// Unreleased header literal
    pub header: String,
}

impl Settings {
    /// Resolve settings for a CLI invocation
    pub fn resolve(cli: &Cli, cwd: &Path) -> anyhow::Result<Self> {
        Self::load(
            cwd,
            cli.config.as_deref(),
            cli.changelog.clone(),
            cli.header.clone(),
        )
    }

    /// Load configuration and apply overrides
    pub fn load(
        cwd: &Path,
        config_file: Option<&Path>,
        changelog: Option<PathBuf>,
        header: Option<String>,
    ) -> anyhow::Result<Self> {
        let (config, config_path) = match config_file {
            Some(path) => {
                let path = cwd.join(path);
                let config = load_config(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?;
                (config, Some(path))
            }
            None => load_config_or_default(cwd).context("failed to load config")?,
        };

        let file = changelog.unwrap_or_else(|| config.changelog.file.clone());
        let changelog = cwd.join(file);

        let header = header.unwrap_or_else(|| config.changelog.unreleased_header.clone());
        if header.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "header".to_string(),
                message: "Unreleased header cannot be empty".to_string(),
            }
            .into());
        }

        debug!(
            changelog = %changelog.display(),
            header = %header,
            config = ?config_path,
            "resolved settings"
        );

        Ok(Self {
            workdir: cwd.to_path_buf(),
            config,
            config_path,
            changelog,
            header,
        })
    }

    /// The tool's own commit message, which is never recorded as an entry
    pub fn commit_message(&self) -> &str {
        &self.config.git.commit_message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(temp.path(), None, None, None).unwrap();
        assert_eq!(settings.changelog, temp.path().join("./CHANGES.md"));
        assert_eq!(settings.header, "## Unreleased");
        assert!(settings.config_path.is_none());
    }

    #[test]
    fn test_config_file_then_overrides() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("chronicler.toml"),
            "[changelog]\nfile = \"HISTORY.md\"\nunreleased_header = \"## Next\"\n",
        )
        .unwrap();

        let settings = Settings::load(temp.path(), None, None, None).unwrap();
        assert_eq!(settings.changelog, temp.path().join("HISTORY.md"));
        assert_eq!(settings.header, "## Next");

        let settings = Settings::load(
            temp.path(),
            None,
            Some(PathBuf::from("docs/CHANGES.md")),
            Some("## Pending".to_string()),
        )
        .unwrap();
        assert_eq!(settings.changelog, temp.path().join("docs/CHANGES.md"));
        assert_eq!(settings.header, "## Pending");
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let result = Settings::load(temp.path(), Some(Path::new("missing.toml")), None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_header_rejected() {
        let temp = TempDir::new().unwrap();
        let result = Settings::load(temp.path(), None, None, Some("  ".to_string()));
        assert!(result.is_err());
    }
}
