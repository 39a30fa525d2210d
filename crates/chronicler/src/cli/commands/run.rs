//! Run command: CI entrypoint dispatching on the pushed ref

use clap::Args;
use tracing::info;

use chronicler_core::CiEvent;

use super::{ForgeArgs, PublishArgs, ReleaseCommand, UpdateCommand};
use crate::cli::{output, Cli, OutputFormat};

/// Update on branch pushes, release on tag pushes
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Fully-qualified ref that triggered the run, e.g. refs/heads/main
    #[arg(long = "ref", env = "GITHUB_REF")]
    pub git_ref: String,

    /// Release date as YYYY-MM-DD for tag pushes (default: today, UTC)
    #[arg(long)]
    pub date: Option<String>,

    #[command(flatten)]
    pub publish: PublishArgs,

    #[command(flatten)]
    pub forge: ForgeArgs,
}

impl RunCommand {
    /// Execute the run command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let event = CiEvent::from_ref(&self.git_ref);
        info!(event = %event, "executing run command");

        match &event {
            CiEvent::Branch(branch) => {
                let settings = cli.settings()?;
                let update = UpdateCommand {
                    publish: self.publish.clone(),
                    forge: self.forge.clone(),
                };
                update.run(&settings, Some(branch))?.print(cli)
            }
            CiEvent::Tag(tag) => {
                let settings = cli.settings()?;
                let release = ReleaseCommand {
                    tag: Some(tag.clone()),
                    date: self.date.clone(),
                    publish: self.publish.clone(),
                };
                release.run(&settings)?.print(cli)
            }
            CiEvent::Other(_) => {
                match cli.format {
                    OutputFormat::Json => output::json(&serde_json::json!({
                        "status": "skipped",
                        "event": event,
                    }))?,
                    OutputFormat::Text if !cli.quiet => {
                        output::info(&format!("Skipping {}", event));
                    }
                    OutputFormat::Text => {}
                }
                Ok(())
            }
        }
    }
}
