//! Show command

use clap::Args;
use tracing::info;

use chronicler_changelog::get_unreleased_content;

use crate::cli::{output, Cli, OutputFormat};

/// Print the pending Unreleased content
#[derive(Debug, Args)]
pub struct ShowCommand {}

impl ShowCommand {
    /// Execute the show command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing show command");
        let settings = cli.settings()?;
        let content = get_unreleased_content(&settings.changelog, &settings.header)?;

        match cli.format {
            OutputFormat::Json => output::json(&serde_json::json!({
                "changelog": settings.changelog,
                "header": settings.header,
                "config": settings.config_path,
                "content": content,
            })),
            OutputFormat::Text => {
                match content {
                    Some(content) => println!("{}", content),
                    None if !cli.quiet => output::info(&format!(
                        "Nothing pending under '{}' in {}",
                        settings.header,
                        output::path_style().apply_to(settings.changelog.display())
                    )),
                    None => {}
                }
                Ok(())
            }
        }
    }
}
