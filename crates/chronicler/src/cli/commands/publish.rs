//! Committing and pushing the rewritten changelog

use anyhow::Context;
use clap::Args;
use tracing::info;

use chronicler_git::{commit_and_push, PublishOptions};

use crate::cli::Settings;

/// Flags shared by the commands that rewrite the changelog
#[derive(Debug, Clone, Default, Args)]
pub struct PublishArgs {
    /// Branch to push the changelog commit to
    #[arg(long)]
    pub branch: Option<String>,

    /// Dry run - report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write the changelog but leave committing to someone else
    #[arg(long)]
    pub no_commit: bool,

    /// Commit but do not push
    #[arg(long)]
    pub no_push: bool,
}

impl PublishArgs {
    /// Branch the commit is pushed to: the flag, then `detected`, then the
    /// configured branch
    pub fn target_branch(&self, settings: &Settings, detected: Option<&str>) -> String {
        self.branch
            .as_deref()
            .or(detected)
            .unwrap_or(&settings.config.git.branch)
            .to_string()
    }

    /// Options for the git sink, or `None` when nothing should be committed
    pub fn options(&self, settings: &Settings, detected: Option<&str>) -> Option<PublishOptions> {
        if self.dry_run || self.no_commit {
            return None;
        }

        let git = &settings.config.git;
        Some(
            PublishOptions::new(&git.remote, self.target_branch(settings, detected))
                .with_push(git.push && !self.no_push)
                .with_identity(git.user_name.clone(), git.user_email.clone()),
        )
    }

    /// Commit the changelog and push it. Returns whether a commit was made.
    pub fn publish(&self, settings: &Settings, detected: Option<&str>) -> anyhow::Result<bool> {
        let Some(options) = self.options(settings, detected) else {
            info!("skipping commit");
            return Ok(false);
        };

        commit_and_push(
            &settings.workdir,
            &settings.changelog,
            settings.commit_message(),
            &options,
        )
        .with_context(|| format!("failed to publish {}", settings.changelog.display()))
    }
}
