//! Concurrent pull request resolution

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use chronicler_core::error::ForgeError;

/// Something that can tell which pull request introduced a commit
#[async_trait]
pub trait PullRequestLookup: Send + Sync {
    /// Pull request number for the commit `sha`, if there is one
    async fn pull_request_for_commit(&self, sha: &str) -> Result<Option<u64>, ForgeError>;
}

/// Look up pull requests for all `hashes` concurrently.
///
/// Lookups are independent of each other; one that fails is logged and
/// treated as "no pull request" so enrichment never aborts a run.
pub async fn resolve_pull_requests(
    lookup: Arc<dyn PullRequestLookup>,
    hashes: Vec<String>,
) -> HashMap<String, u64> {
    let mut tasks = JoinSet::new();
    for hash in hashes {
        let lookup = Arc::clone(&lookup);
        tasks.spawn(async move {
            let result = lookup.pull_request_for_commit(&hash).await;
            (hash, result)
        });
    }

    let mut resolved = HashMap::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((hash, Ok(Some(number)))) => {
                debug!(hash = %hash, number, "resolved pull request");
                resolved.insert(hash, number);
            }
            Ok((hash, Ok(None))) => debug!(hash = %hash, "no pull request for commit"),
            Ok((hash, Err(e))) => warn!(hash = %hash, error = %e, "pull request lookup failed"),
            Err(e) => warn!(error = %e, "pull request lookup task panicked"),
        }
    }

    resolved
}
