//! CLI definition and command handling

pub mod commands;
pub mod output;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{
    CheckCommand, InitCommand, ReleaseCommand, RunCommand, ShowCommand, UpdateCommand,
};

pub use settings::Settings;

/// Chronicler - keep a changelog current from commits and release tags
#[derive(Debug, Parser)]
#[command(name = "chronicler")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Configuration file (default: searched upwards from the working directory)
    #[arg(long, global = true, env = "CHRONICLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Changelog file
    #[arg(long, global = true, env = "CHANGELOG_PATH")]
    pub changelog: Option<PathBuf>,

    /// Literal header line of the Unreleased section
    #[arg(long, global = true, env = "UNRELEASED_HEADER")]
    pub header: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Append new commits to the Unreleased section (branch push)
    Update(UpdateCommand),

    /// Promote the Unreleased section to a release (tag push)
    Release(ReleaseCommand),

    /// Dispatch on the CI ref: update for branches, release for tags
    Run(RunCommand),

    /// Print the pending Unreleased content
    Show(ShowCommand),

    /// Check whether a commit message is already recorded
    Check(CheckCommand),

    /// Write a default configuration file
    Init(InitCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match &self.command {
            Commands::Update(cmd) => cmd.execute(self),
            Commands::Release(cmd) => cmd.execute(self),
            Commands::Run(cmd) => cmd.execute(self),
            Commands::Show(cmd) => cmd.execute(self),
            Commands::Check(cmd) => cmd.execute(self),
            Commands::Init(cmd) => cmd.execute(self),
        }
    }

    /// Resolve configuration for the current working directory
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let cwd = std::env::current_dir()?;
        Settings::resolve(self, &cwd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "chronicler",
            "release",
            "--tag",
            "v1.1.0",
            "--changelog",
            "HISTORY.md",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.changelog, Some(PathBuf::from("HISTORY.md")));
        match cli.command {
            Commands::Release(cmd) => assert_eq!(cmd.tag.as_deref(), Some("v1.1.0")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["chronicler", "check", "fix: crash (#4)"]).unwrap();
        match cli.command {
            Commands::Check(cmd) => assert_eq!(cmd.message, "fix: crash (#4)"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
