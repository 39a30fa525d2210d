//! Check command

use clap::Args;
use tracing::info;

use chronicler_changelog::is_entry_in_changelog;

use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes;

/// Check whether a commit message is already recorded
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Raw commit summary to look for
    pub message: String,
}

impl CheckCommand {
    /// Execute the check command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(message = %self.message, "executing check command");
        let settings = cli.settings()?;
        let recorded = is_entry_in_changelog(&settings.changelog, &self.message)?;

        match cli.format {
            OutputFormat::Json => output::json(&serde_json::json!({
                "changelog": settings.changelog,
                "message": self.message,
                "recorded": recorded,
            }))?,
            OutputFormat::Text if !cli.quiet => {
                if recorded {
                    output::success("Already recorded");
                } else {
                    output::warning("Not recorded");
                }
            }
            OutputFormat::Text => {}
        }

        if !recorded {
            std::process::exit(exit_codes::NOT_RECORDED);
        }
        Ok(())
    }
}
