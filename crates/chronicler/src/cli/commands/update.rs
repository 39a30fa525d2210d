//! Update command: record new commits under the Unreleased header

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::{debug, info, warn};

use chronicler_changelog::{
    build_entries, format_entry, new_commits, split_pr_reference, ChangelogDocument,
};
use chronicler_forge::{resolve_pull_requests, GitHubClient};
use chronicler_git::{CommitInfo, GitRepo};

use super::PublishArgs;
use crate::cli::{output, Cli, OutputFormat, Settings};

/// Pull request lookup flags
#[derive(Debug, Clone, Default, Args)]
pub struct ForgeArgs {
    /// Do not ask the forge which pull request introduced a commit
    #[arg(long)]
    pub no_pr_lookup: bool,

    /// Repository as `owner/name`
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,
}

impl ForgeArgs {
    /// Pull request numbers for commits whose summary carries none,
    /// keyed by full hash. Lookup problems never fail the run.
    pub fn resolve(
        &self,
        settings: &Settings,
        commits: &[&CommitInfo],
    ) -> anyhow::Result<HashMap<String, u64>> {
        if self.no_pr_lookup || !settings.config.github.resolve_pull_requests {
            return Ok(HashMap::new());
        }

        let hashes: Vec<String> = commits
            .iter()
            .filter(|c| split_pr_reference(&c.message).1.is_none())
            .map(|c| c.hash.clone())
            .collect();
        if hashes.is_empty() {
            return Ok(HashMap::new());
        }

        let Some(repository) = self
            .repository
            .as_deref()
            .or(settings.config.github.repository.as_deref())
        else {
            debug!("no repository configured, skipping pull request lookup");
            return Ok(HashMap::new());
        };
        let api_url = self
            .api_url
            .as_deref()
            .unwrap_or(&settings.config.github.api_url);

        let client = match GitHubClient::new(api_url, repository, self.token.clone()) {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "skipping pull request lookup");
                return Ok(HashMap::new());
            }
        };

        info!(count = hashes.len(), repository, "looking up pull requests");
        let runtime = tokio::runtime::Runtime::new()?;
        Ok(runtime.block_on(resolve_pull_requests(Arc::new(client), hashes)))
    }
}

/// Append new commits to the Unreleased section
#[derive(Debug, Clone, Default, Args)]
pub struct UpdateCommand {
    #[command(flatten)]
    pub publish: PublishArgs,

    #[command(flatten)]
    pub forge: ForgeArgs,
}

/// What an update did
#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub changelog: PathBuf,
    pub entries: Vec<String>,
    pub written: bool,
    pub committed: bool,
    pub dry_run: bool,
}

impl UpdateCommand {
    /// Execute the update command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            dry_run = self.publish.dry_run,
            no_commit = self.publish.no_commit,
            no_push = self.publish.no_push,
            "executing update command"
        );
        let settings = cli.settings()?;
        let report = self.run(&settings, None)?;
        report.print(cli)
    }

    /// Record pending commits. `branch` is the pushed branch when known.
    pub fn run(&self, settings: &Settings, branch: Option<&str>) -> anyhow::Result<UpdateReport> {
        let repo = GitRepo::discover(&settings.workdir).context("failed to open repository")?;
        let commits = repo
            .commits_since_latest_tag()
            .context("failed to collect commits")?;

        let existing = ChangelogDocument::load(&settings.changelog)?;
        let mut document = existing
            .unwrap_or_else(|| ChangelogDocument::seeded(&settings.config.changelog.title));

        let pending = new_commits(&document, &commits, &[settings.commit_message()]);
        let mut report = UpdateReport {
            changelog: settings.changelog.clone(),
            entries: Vec::new(),
            written: false,
            committed: false,
            dry_run: self.publish.dry_run,
        };
        if pending.is_empty() {
            info!("changelog already up to date");
            return Ok(report);
        }

        let remote_prs = self.forge.resolve(settings, &pending)?;
        let entries = build_entries(&pending, &remote_prs);
        report.entries = entries.iter().map(format_entry).collect();

        if !document.append_entries(&settings.header, &entries) || self.publish.dry_run {
            return Ok(report);
        }

        document
            .save(&settings.changelog)
            .context("failed to update changelog")?;
        report.written = true;
        info!(count = entries.len(), "recorded new commits");

        let detected = match branch {
            Some(branch) => Some(branch.to_string()),
            None => repo.current_branch()?,
        };
        report.committed = self.publish.publish(settings, detected.as_deref())?;
        Ok(report)
    }
}

impl UpdateReport {
    /// Print the report in the requested format
    pub fn print(&self, cli: &Cli) -> anyhow::Result<()> {
        match cli.format {
            OutputFormat::Json => output::json(self),
            OutputFormat::Text => {
                if cli.quiet {
                    return Ok(());
                }
                let path = output::path_style()
                    .apply_to(self.changelog.display())
                    .to_string();
                if self.entries.is_empty() {
                    output::info(&format!("No new commits for {}", path));
                    return Ok(());
                }
                for entry in &self.entries {
                    println!("{}", entry);
                }
                if self.dry_run {
                    output::warning(&format!(
                        "Dry run: {} entries not written to {}",
                        self.entries.len(),
                        path
                    ));
                } else if self.committed {
                    output::success(&format!(
                        "Recorded and committed {} entries",
                        self.entries.len()
                    ));
                } else {
                    output::success(&format!(
                        "Recorded {} entries in {}",
                        self.entries.len(),
                        path
                    ));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use std::path::Path;
    use tempfile::TempDir;

    fn commit(repo: &Repository, root: &Path, name: &str, message: &str, author: &str) {
        std::fs::write(root.join(name), message).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::now(author, "dev@example.com").unwrap();
        let parents: Vec<git2::Commit<'_>> = repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .into_iter()
            .collect();
        let parents: Vec<&git2::Commit<'_>> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap();
    }

    fn offline() -> UpdateCommand {
        UpdateCommand {
            publish: PublishArgs {
                no_commit: true,
                ..Default::default()
            },
            forge: ForgeArgs {
                no_pr_lookup: true,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_update_records_commits_since_tag() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        commit(&repo, temp.path(), "a.txt", "Initial release", "Alice");
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        repo.tag_lightweight("v1.0.0", head.as_object(), false)
            .unwrap();
        commit(&repo, temp.path(), "b.txt", "fix: crash (#12)", "Bob");
        commit(&repo, temp.path(), "c.txt", "feat: export", "Eve");

        let settings = Settings::load(temp.path(), None, None, None).unwrap();
        let report = offline().run(&settings, None).unwrap();

        assert_eq!(
            report.entries,
            vec!["- fix: crash (#12) by Bob", "- feat: export by Eve"]
        );
        assert!(report.written);
        assert!(!report.committed);
        assert_eq!(
            std::fs::read_to_string(&settings.changelog).unwrap(),
            "# Changelog\n\n## Unreleased\n- fix: crash (#12) by Bob\n- feat: export by Eve\n"
        );

        // nothing new on a second run
        let report = offline().run(&settings, None).unwrap();
        assert!(report.entries.is_empty());
        assert!(!report.written);
    }

    #[test]
    fn test_update_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        commit(&repo, temp.path(), "a.txt", "feat: first", "Ann");

        let settings = Settings::load(temp.path(), None, None, None).unwrap();
        let mut command = offline();
        command.publish.dry_run = true;
        let report = command.run(&settings, None).unwrap();

        assert_eq!(report.entries, vec!["- feat: first by Ann"]);
        assert!(!report.written);
        assert!(!settings.changelog.exists());
    }

    #[test]
    fn test_resolve_skips_without_repository() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(temp.path(), None, None, None).unwrap();
        let info = CommitInfo::new("abc", "feat: x", "Ann", "a@example.com", chrono::Utc::now());
        let resolved = ForgeArgs::default().resolve(&settings, &[&info]).unwrap();
        assert!(resolved.is_empty());
    }
}
