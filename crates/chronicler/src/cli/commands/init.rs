//! Init command

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use chronicler_core::config::defaults::{default_config_toml, DEFAULT_CONFIG_TOML};

use crate::cli::{output, Cli};

/// Write a default configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, "executing init command");
        let cwd = std::env::current_dir()?;
        let path = self.write(&cwd)?;

        if !cli.quiet {
            output::success(&format!(
                "Created {}",
                output::path_style().apply_to(path.display())
            ));
        }
        Ok(())
    }

    /// Write the default configuration relative to `cwd`
    pub fn write(&self, cwd: &std::path::Path) -> anyhow::Result<PathBuf> {
        let path = cwd.join(
            self.output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_TOML)),
        );

        if path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                path.display()
            );
        }

        std::fs::write(&path, default_config_toml())
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}
