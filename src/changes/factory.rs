use regex::Regex;
use std::sync::LazyLock;

use crate::{
    changes::change::{Category, Change},
    forge::request::PullRequest,
};

// one or more "[Package]" tokens at the very start of a title
static LEADING_PACKAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[(?<packages>[^\]]+)\]").unwrap());

/// Keyword rule mapping a title pattern to a category.
struct CategoryRule {
    category: Category,
    pattern: Regex,
}

impl CategoryRule {
    fn new(category: Category, pattern: &str) -> Self {
        Self {
            category,
            pattern: Regex::new(pattern).unwrap(),
        }
    }
}

// first matching rule wins
static CATEGORY_RULES: LazyLock<Vec<CategoryRule>> = LazyLock::new(|| {
    vec![
        CategoryRule::new(Category::Added, r"(?i)\b(add(s|ed|ing)?|new)\b"),
        CategoryRule::new(Category::Fixed, r"(?i)\b(fix(es|ed|ing)?|bug\w*)\b"),
        CategoryRule::new(
            Category::Removed,
            r"(?i)\b(remov\w*|drop(s|ped|ping)?|delet\w*)\b",
        ),
        CategoryRule::new(
            Category::Changed,
            r"(?i)\b(chang\w*|updat\w*|improv\w*|refactor\w*|renam\w*)\b",
        ),
        CategoryRule::new(Category::Security, r"(?i)\b(security|cve-\d+)"),
        CategoryRule::new(Category::Deprecated, r"(?i)\bdeprecat\w*"),
    ]
});

// label fallback when the title carries no keyword
const LABEL_CATEGORIES: &[(&str, Category)] = &[
    ("added", Category::Added),
    ("enhancement", Category::Added),
    ("feature", Category::Added),
    ("changed", Category::Changed),
    ("breaking", Category::Changed),
    ("deprecated", Category::Deprecated),
    ("deprecation", Category::Deprecated),
    ("removed", Category::Removed),
    ("fixed", Category::Fixed),
    ("bug", Category::Fixed),
    ("security", Category::Security),
];

#[derive(Debug, Default)]
/// Turns fetched pull requests into classified changes.
pub struct ChangeFactory {}

impl ChangeFactory {
    pub fn new() -> Self {
        Self {}
    }

    pub fn create_from_pull_request(
        &self,
        pull_request: &PullRequest,
    ) -> Change {
        let (packages, remainder) = Self::split_packages(&pull_request.title);
        let title = remainder.split_whitespace().collect::<Vec<_>>().join(" ");

        let category = Self::resolve_category(&title)
            .or_else(|| {
                Self::resolve_category_from_labels(&pull_request.labels)
            })
            .unwrap_or_default();

        Change::new(
            pull_request.id,
            title,
            category,
            packages,
            pull_request.author.clone(),
            pull_request.merged_at,
            pull_request.tag.clone(),
        )
    }

    /// Strips every leading bracket token, returning the package names and
    /// what is left of the title.
    fn split_packages(title: &str) -> (Vec<String>, &str) {
        let mut packages: Vec<String> = vec![];
        let mut remainder = title;

        while let Some(captures) = LEADING_PACKAGE_REGEX.captures(remainder) {
            for name in captures["packages"].split(',') {
                let name = name.trim();
                if !name.is_empty() && !packages.iter().any(|p| p == name) {
                    packages.push(name.to_string());
                }
            }
            remainder = &remainder[captures[0].len()..];
        }

        (packages, remainder)
    }

    fn resolve_category(title: &str) -> Option<Category> {
        CATEGORY_RULES
            .iter()
            .find(|rule| rule.pattern.is_match(title))
            .map(|rule| rule.category)
    }

    fn resolve_category_from_labels(labels: &[String]) -> Option<Category> {
        labels.iter().find_map(|label| {
            let label = label.trim().to_lowercase();
            LABEL_CATEGORIES
                .iter()
                .find(|(name, _)| *name == label)
                .map(|(_, category)| *category)
        })
    }
}
