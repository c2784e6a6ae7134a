use chrono::{DateTime, Utc};

use crate::forge::request::ReleaseTag;

/// Maps a merge date to the first release tag cut at or after it.
#[derive(Debug, Default)]
pub struct TagResolver {
    tags: Vec<ReleaseTag>,
}

impl TagResolver {
    pub fn new(mut tags: Vec<ReleaseTag>) -> Self {
        tags.sort_by(|a, b| {
            a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name))
        });
        Self { tags }
    }

    /// `None` means the change has not been released yet.
    pub fn resolve(&self, merged_at: DateTime<Utc>) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.created_at >= merged_at)
            .map(|tag| tag.name.as_str())
    }
}
