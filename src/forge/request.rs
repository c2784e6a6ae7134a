use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Merged pull request as reported by the host. Never mutated once fetched.
pub struct PullRequest {
    /// Host-assigned number, monotonically increasing per repository.
    pub id: u64,
    pub title: String,
    pub merged_at: DateTime<Utc>,
    /// Login of the pull request author, when the host exposes one.
    pub author: Option<String>,
    pub labels: Vec<String>,
    /// Release tag the host already associates with this pull request.
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Release tag together with the date of the commit it points to.
pub struct ReleaseTag {
    pub name: String,
    pub created_at: DateTime<Utc>,
}
