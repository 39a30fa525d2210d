//! Publishing changelog changes through the git CLI
//!
//! Commit and push shell out to `git` rather than going through git2 so that
//! whatever credential helper the CI runner configured is honoured.

use std::path::Path;
use std::process::{Command, Output};

use tracing::{debug, info, instrument};

use chronicler_core::error::GitError;

use crate::repository::Result;

/// Options for [`commit_and_push`]
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Remote to push to
    pub remote: String,
    /// Destination branch on the remote
    pub branch: String,
    /// Push after committing
    pub push: bool,
    /// Committer name to configure, if any
    pub user_name: Option<String>,
    /// Committer email to configure, if any
    pub user_email: Option<String>,
}

impl PublishOptions {
    /// Create options pushing to `remote`/`branch`
    pub fn new(remote: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
            branch: branch.into(),
            push: true,
            user_name: None,
            user_email: None,
        }
    }

    /// Enable or disable pushing
    pub fn with_push(mut self, push: bool) -> Self {
        self.push = push;
        self
    }

    /// Set the committer identity
    pub fn with_identity(mut self, name: Option<String>, email: Option<String>) -> Self {
        self.user_name = name;
        self.user_email = email;
        self
    }
}

/// Commit `file` with `message` inside `workdir` and optionally push it.
///
/// Returns `false` without committing when the file has no staged changes.
#[instrument(skip(options), fields(workdir = %workdir.display(), file = %file.display()))]
pub fn commit_and_push(
    workdir: &Path,
    file: &Path,
    message: &str,
    options: &PublishOptions,
) -> Result<bool> {
    let start = std::time::Instant::now();

    if let Some(name) = &options.user_name {
        run_git(workdir, "config user.name", &["config", "user.name", name])?;
    }
    if let Some(email) = &options.user_email {
        run_git(workdir, "config user.email", &["config", "user.email", email])?;
    }

    let file_arg = file.to_string_lossy();
    run_git(workdir, "add", &["add", "--", &file_arg])?;

    let diff = git(workdir, &["diff", "--cached", "--quiet", "--", &file_arg])?;
    if diff.status.success() {
        info!("no changelog changes to commit");
        return Ok(false);
    }

    run_git(workdir, "commit", &["commit", "-m", message, "--", &file_arg])?;
    debug!(message, "committed changelog");

    if options.push {
        let refspec = format!("HEAD:refs/heads/{}", options.branch);
        run_git(workdir, "push", &["push", &options.remote, &refspec])?;
    }

    info!(
        remote = %options.remote,
        branch = %options.branch,
        pushed = options.push,
        duration_ms = start.elapsed().as_millis(),
        "published changelog"
    );
    Ok(true)
}

fn git(workdir: &Path, args: &[&str]) -> Result<Output> {
    Ok(Command::new("git").current_dir(workdir).args(args).output()?)
}

fn run_git(workdir: &Path, step: &str, args: &[&str]) -> Result<Output> {
    let output = git(workdir, args)?;
    if !output.status.success() {
        return Err(GitError::CommandFailed {
            step: step.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}
