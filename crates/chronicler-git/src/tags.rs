//! Tag operations

use git2::{DescribeFormatOptions, DescribeOptions, ErrorCode};
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Name of the most recent tag reachable from HEAD, if any.
    ///
    /// Equivalent to `git describe --tags --abbrev=0`.
    #[instrument(skip(self))]
    pub fn latest_reachable_tag(&self) -> Result<Option<String>> {
        let mut opts = DescribeOptions::new();
        opts.describe_tags();

        let describe = match self.repo.describe(&opts) {
            Ok(describe) => describe,
            Err(e) if e.code() == ErrorCode::NotFound || e.code() == ErrorCode::UnbornBranch => {
                debug!("no reachable tag");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);
        let name = describe.format(Some(&format))?;

        debug!(tag = %name, "found latest reachable tag");
        Ok(Some(name))
    }

    /// Check whether a tag with this name exists
    pub fn has_tag(&self, name: &str) -> Result<bool> {
        let tag_ref = format!("refs/tags/{}", name);
        match self.repo.find_reference(&tag_ref) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
