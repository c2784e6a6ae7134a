//! Manager that wraps forge implementations
use log::*;

use crate::{
    Result,
    forge::{
        request::{PullRequest, ReleaseTag},
        traits::Forge,
    },
};

pub struct ForgeManager {
    forge: Box<dyn Forge>,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>) -> Self {
        Self { forge }
    }

    /// Merged pull requests strictly newer than the watermark, ascending by
    /// id and free of duplicates, whatever order the forge returned them in.
    pub async fn list_merged_pull_requests_since(
        &self,
        since_id: u64,
    ) -> Result<Vec<PullRequest>> {
        debug!("listing merged pull requests since #{since_id}");

        let mut pull_requests =
            self.forge.list_merged_pull_requests_since(since_id).await?;

        pull_requests.retain(|pr| pr.id > since_id);
        pull_requests.sort_by_key(|pr| pr.id);
        pull_requests.dedup_by_key(|pr| pr.id);

        Ok(pull_requests)
    }

    /// Release tags ordered oldest first.
    pub async fn list_release_tags(&self) -> Result<Vec<ReleaseTag>> {
        let mut tags = self.forge.list_release_tags().await?;
        tags.sort_by(|a, b| {
            a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name))
        });
        Ok(tags)
    }
}
