//! Release command: promote the Unreleased section for a tag

use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Args;
use serde::Serialize;
use tracing::info;

use chronicler_changelog::{
    format_version_header, get_unreleased_content, release, ReleaseOutcome,
};
use chronicler_git::GitRepo;

use super::PublishArgs;
use crate::cli::{output, Cli, OutputFormat, Settings};

/// Promote the Unreleased section to a dated release
#[derive(Debug, Clone, Default, Args)]
pub struct ReleaseCommand {
    /// Version to release (default: latest tag reachable from HEAD)
    #[arg(long)]
    pub tag: Option<String>,

    /// Release date as YYYY-MM-DD (default: today, UTC)
    #[arg(long)]
    pub date: Option<String>,

    #[command(flatten)]
    pub publish: PublishArgs,
}

/// What a release did
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseReport {
    pub changelog: PathBuf,
    pub version: String,
    pub date: String,
    #[serde(flatten)]
    pub outcome: ReleaseOutcome,
    pub committed: bool,
    pub dry_run: bool,
}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            tag = ?self.tag,
            date = ?self.date,
            dry_run = self.publish.dry_run,
            "executing release command"
        );
        let settings = cli.settings()?;
        let report = self.run(&settings)?;
        report.print(cli)
    }

    /// Promote pending changes for the resolved version
    pub fn run(&self, settings: &Settings) -> anyhow::Result<ReleaseReport> {
        let version = self.version(settings)?;
        let date = release_date(self.date.as_deref())?;
        let template = &settings.config.changelog.version_header;

        let mut report = ReleaseReport {
            changelog: settings.changelog.clone(),
            version: version.clone(),
            date: date.clone(),
            outcome: ReleaseOutcome::NothingToRelease,
            committed: false,
            dry_run: self.publish.dry_run,
        };

        if self.publish.dry_run {
            if let Some(content) = get_unreleased_content(&settings.changelog, &settings.header)? {
                report.outcome = ReleaseOutcome::Promoted {
                    version_header: format_version_header(template, &version, &date),
                    content,
                };
            }
            return Ok(report);
        }

        report.outcome = release(
            &settings.changelog,
            &settings.header,
            template,
            &version,
            &date,
        )
        .with_context(|| format!("failed to release {}", version))?;

        if matches!(report.outcome, ReleaseOutcome::Promoted { .. }) {
            // tag builds run on a detached HEAD, so no branch is detected
            report.committed = self.publish.publish(settings, None)?;
        }
        Ok(report)
    }

    fn version(&self, settings: &Settings) -> anyhow::Result<String> {
        if let Some(tag) = &self.tag {
            return Ok(tag.clone());
        }

        let repo = GitRepo::discover(&settings.workdir).context("failed to open repository")?;
        repo.latest_reachable_tag()?
            .ok_or_else(|| anyhow::anyhow!("No tag given and no tag is reachable from HEAD"))
    }
}

/// Validate `date` or fall back to today's UTC date
pub fn release_date(date: Option<&str>) -> anyhow::Result<String> {
    match date {
        Some(date) => {
            let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .with_context(|| format!("invalid release date '{}', expected YYYY-MM-DD", date))?;
            Ok(parsed.format("%Y-%m-%d").to_string())
        }
        None => Ok(Utc::now().format("%Y-%m-%d").to_string()),
    }
}

impl ReleaseReport {
    /// Print the report in the requested format
    pub fn print(&self, cli: &Cli) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => output::json(self),
            OutputFormat::Text => {
                if cli.quiet {
                    return Ok(());
                }
                match &self.outcome {
                    ReleaseOutcome::NothingToRelease => {
                        output::info(&format!("Nothing to release for {}", self.version));
                    }
                    ReleaseOutcome::Promoted {
                        version_header,
                        content,
                    } => {
                        println!("{}", output::version_style().apply_to(version_header));
                        println!("{}", content);
                        if self.dry_run {
                            output::warning("Dry run: changelog not modified");
                        } else {
                            output::success(&format!(
                                "Released {} in {}",
                                self.version,
                                output::path_style().apply_to(self.changelog.display())
                            ));
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
