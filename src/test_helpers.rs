//! Common test helper functions shared across test modules.
//!
//! This module provides reusable fixtures so test suites don't each build
//! forge records by hand.
use chrono::{DateTime, Utc};

use crate::forge::request::PullRequest;

/// Merge date given to every test pull request.
pub const TEST_MERGED_AT: &str = "2024-01-01T00:00:00Z";

/// Creates a test PullRequest with the given parameters, no author, no
/// labels, no tag, merged at [`TEST_MERGED_AT`].
///
/// # Arguments
/// * `id` - PR number
/// * `title` - PR title
///
/// # Example
/// ```ignore
/// let pr = create_test_pull_request(42, "[Core] Add parser");
/// ```
pub fn create_test_pull_request(id: u64, title: &str) -> PullRequest {
    PullRequest {
        id,
        title: title.to_string(),
        merged_at: datetime(TEST_MERGED_AT),
        author: None,
        labels: vec![],
        tag: None,
    }
}

/// Parses an RFC 3339 timestamp.
pub fn datetime(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .unwrap()
        .with_timezone(&Utc)
}
