//! Traits related to remote git forges
use async_trait::async_trait;

use crate::{
    Result,
    forge::request::{PullRequest, ReleaseTag},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    /// Every merged pull request whose number is greater than `since_id`.
    /// Implementations must drain all pages or fail as a whole.
    async fn list_merged_pull_requests_since(
        &self,
        since_id: u64,
    ) -> Result<Vec<PullRequest>>;

    async fn list_release_tags(&self) -> Result<Vec<ReleaseTag>>;
}
