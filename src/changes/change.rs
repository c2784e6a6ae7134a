use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Changelog categories in rendering order.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
)]
pub enum Category {
    Added,
    Changed,
    Deprecated,
    Removed,
    Fixed,
    Security,
    #[default]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Added => "Added",
            Category::Changed => "Changed",
            Category::Deprecated => "Deprecated",
            Category::Removed => "Removed",
            Category::Fixed => "Fixed",
            Category::Security => "Security",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A merged pull request classified for the changelog.
///
/// Only the release tag may change after construction; `id` is the
/// de-duplication key and the final sort tie-breaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    id: u64,
    title: String,
    category: Category,
    packages: Vec<String>,
    author: Option<String>,
    merged_at: DateTime<Utc>,
    tag: Option<String>,
}

impl Change {
    pub(crate) fn new(
        id: u64,
        title: String,
        category: Category,
        packages: Vec<String>,
        author: Option<String>,
        merged_at: DateTime<Utc>,
        tag: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            category,
            packages,
            author,
            merged_at,
            tag,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Package names in the order they appeared in the title.
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// First package, used as the package sort and grouping key.
    pub fn primary_package(&self) -> Option<&str> {
        self.packages.first().map(String::as_str)
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn merged_at(&self) -> DateTime<Utc> {
        self.merged_at
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn attach_tag(&mut self, tag: impl Into<String>) {
        self.tag = Some(tag.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_ordered_for_rendering() {
        let mut shuffled = vec![
            Category::Other,
            Category::Fixed,
            Category::Added,
            Category::Security,
            Category::Removed,
            Category::Deprecated,
            Category::Changed,
        ];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![
                Category::Added,
                Category::Changed,
                Category::Deprecated,
                Category::Removed,
                Category::Fixed,
                Category::Security,
                Category::Other,
            ]
        );
    }

    #[test]
    fn primary_package_is_first_listed() {
        let change = Change::new(
            1,
            "Add parser".into(),
            Category::Added,
            vec!["Core".into(), "Parser".into()],
            None,
            Utc::now(),
            None,
        );
        assert_eq!(change.primary_package(), Some("Core"));
    }

    #[test]
    fn attach_tag_only_sets_tag() {
        let mut change = Change::new(
            7,
            "Fix crash".into(),
            Category::Fixed,
            vec![],
            Some("octocat".into()),
            Utc::now(),
            None,
        );
        let before = change.clone();

        change.attach_tag("v1.0.0");

        assert_eq!(change.tag(), Some("v1.0.0"));
        assert_eq!(change.id(), before.id());
        assert_eq!(change.title(), before.title());
        assert_eq!(change.category(), before.category());
    }
}
