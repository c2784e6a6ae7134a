use serde::Deserialize;
use std::cmp::Ordering;

use crate::changes::{change::Change, tags::TagResolver};

/// Which grouping key leads when changes are grouped by both package and
/// category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortPriority {
    #[default]
    None,
    ByPackage,
    ByCategory,
}

impl SortPriority {
    /// Priority from the two grouping flags alone. Package wins ties.
    pub fn from_flags(in_packages: bool, in_categories: bool) -> Self {
        Self::from_flag_order(
            in_packages.then_some(0),
            in_categories.then_some(0),
        )
    }

    /// Priority from the positions at which the grouping flags were
    /// supplied; the earlier flag wins and package wins ties.
    pub fn from_flag_order(
        packages_position: Option<usize>,
        categories_position: Option<usize>,
    ) -> Self {
        match (packages_position, categories_position) {
            (Some(packages), Some(categories)) if categories < packages => {
                SortPriority::ByCategory
            }
            (Some(_), _) => SortPriority::ByPackage,
            (None, Some(_)) => SortPriority::ByCategory,
            (None, None) => SortPriority::None,
        }
    }
}

/// Where changes without a release tag are placed among tag groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreleasedPosition {
    #[default]
    First,
    Last,
}

#[derive(Debug, Default)]
/// Orders changes for rendering. All sorts are stable.
pub struct ChangeSorter {
    unreleased_position: UnreleasedPosition,
}

impl ChangeSorter {
    pub fn new(unreleased_position: UnreleasedPosition) -> Self {
        Self {
            unreleased_position,
        }
    }

    pub fn sort_by_category_and_package(
        &self,
        mut changes: Vec<Change>,
        priority: SortPriority,
    ) -> Vec<Change> {
        changes.sort_by(|a, b| match priority {
            SortPriority::ByPackage => compare_packages(a, b)
                .then_with(|| a.category().cmp(&b.category()))
                .then_with(|| a.id().cmp(&b.id())),
            SortPriority::ByCategory => a
                .category()
                .cmp(&b.category())
                .then_with(|| compare_packages(a, b))
                .then_with(|| a.id().cmp(&b.id())),
            SortPriority::None => a.id().cmp(&b.id()),
        });

        changes
    }

    /// Attaches a resolved tag to every change that has none yet.
    pub fn attach_tags(&self, changes: &mut [Change], resolver: &TagResolver) {
        for change in changes.iter_mut().filter(|c| c.tag().is_none()) {
            if let Some(tag) = resolver.resolve(change.merged_at()) {
                change.attach_tag(tag);
            }
        }
    }

    /// Groups changes by release tag, newest tag first, keeping the existing
    /// order inside each group.
    pub fn sort_by_tags(&self, mut changes: Vec<Change>) -> Vec<Change> {
        changes.sort_by(|a, b| self.compare_tags(a.tag(), b.tag()));
        changes
    }

    fn compare_tags(&self, a: Option<&str>, b: Option<&str>) -> Ordering {
        let unreleased = match self.unreleased_position {
            UnreleasedPosition::First => Ordering::Less,
            UnreleasedPosition::Last => Ordering::Greater,
        };

        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => unreleased,
            (Some(_), None) => unreleased.reverse(),
            // descending: newer releases first
            (Some(a), Some(b)) => compare_release_tags(b, a),
        }
    }
}

fn compare_packages(a: &Change, b: &Change) -> Ordering {
    match (a.primary_package(), b.primary_package()) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn parse_tag_version(tag: &str) -> Option<semver::Version> {
    semver::Version::parse(tag.trim_start_matches(['v', 'V'])).ok()
}

/// Ascending release order: semver-aware, non-semver tags sort below
/// semver ones and compare by name.
fn compare_release_tags(a: &str, b: &str) -> Ordering {
    match (parse_tag_version(a), parse_tag_version(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        changes::factory::ChangeFactory,
        forge::request::ReleaseTag,
        test_helpers::{create_test_pull_request, datetime},
    };

    fn changes(titles: &[(u64, &str)]) -> Vec<Change> {
        let factory = ChangeFactory::new();
        titles
            .iter()
            .map(|(id, title)| {
                factory.create_from_pull_request(&create_test_pull_request(
                    *id, title,
                ))
            })
            .collect()
    }

    fn ids(changes: &[Change]) -> Vec<u64> {
        changes.iter().map(|c| c.id()).collect()
    }

    fn tagged(id: u64, title: &str, tag: Option<&str>) -> Change {
        let mut pull_request = create_test_pull_request(id, title);
        pull_request.tag = tag.map(String::from);
        ChangeFactory::new().create_from_pull_request(&pull_request)
    }

    #[test]
    fn priority_from_flags() {
        assert_eq!(SortPriority::from_flags(false, false), SortPriority::None);
        assert_eq!(
            SortPriority::from_flags(true, false),
            SortPriority::ByPackage
        );
        assert_eq!(
            SortPriority::from_flags(false, true),
            SortPriority::ByCategory
        );
        assert_eq!(
            SortPriority::from_flags(true, true),
            SortPriority::ByPackage
        );
    }

    #[test]
    fn priority_from_flag_order_prefers_first_supplied() {
        assert_eq!(
            SortPriority::from_flag_order(Some(2), Some(1)),
            SortPriority::ByCategory
        );
        assert_eq!(
            SortPriority::from_flag_order(Some(1), Some(2)),
            SortPriority::ByPackage
        );
        assert_eq!(
            SortPriority::from_flag_order(Some(3), Some(3)),
            SortPriority::ByPackage
        );
    }

    #[test]
    fn by_package_puts_unpackaged_changes_last() {
        let sorted = ChangeSorter::default().sort_by_category_and_package(
            changes(&[
                (125, "Fix crash on empty input"),
                (121, "[Core] Add new parser"),
            ]),
            SortPriority::ByPackage,
        );

        assert_eq!(ids(&sorted), vec![121, 125]);
    }

    #[test]
    fn by_package_then_category_then_id() {
        let sorted = ChangeSorter::default().sort_by_category_and_package(
            changes(&[
                (5, "[Zeta] Add z"),
                (4, "[Alpha] Fix a"),
                (3, "[Alpha] Add b"),
                (2, "[Alpha] Add a"),
                (1, "Add loose"),
            ]),
            SortPriority::ByPackage,
        );

        assert_eq!(ids(&sorted), vec![2, 3, 4, 5, 1]);
    }

    #[test]
    fn by_category_then_package_then_id() {
        let sorted = ChangeSorter::default().sort_by_category_and_package(
            changes(&[
                (1, "Fix loose"),
                (2, "[Beta] Fix b"),
                (3, "[Alpha] Fix a"),
                (4, "[Beta] Add b"),
                (5, "Deprecate old flag"),
                (6, "Lorem ipsum"),
            ]),
            SortPriority::ByCategory,
        );

        assert_eq!(ids(&sorted), vec![4, 5, 3, 2, 1, 6]);
    }

    #[test]
    fn no_priority_sorts_by_id_only() {
        let sorted = ChangeSorter::default().sort_by_category_and_package(
            changes(&[(9, "[B] Fix"), (3, "[A] Add"), (5, "Other")]),
            SortPriority::None,
        );

        assert_eq!(ids(&sorted), vec![3, 5, 9]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let sorter = ChangeSorter::default();
        let titles = |changes: &[Change]| {
            changes
                .iter()
                .map(|c| c.title().to_string())
                .collect::<Vec<_>>()
        };

        for priority in [
            SortPriority::None,
            SortPriority::ByPackage,
            SortPriority::ByCategory,
        ] {
            let sorted = sorter.sort_by_category_and_package(
                changes(&[(7, "[Core] Add first"), (7, "[Core] Add second")]),
                priority,
            );
            assert_eq!(
                titles(&sorted),
                vec!["Add first", "Add second"],
                "priority: {priority:?}"
            );

            let sorted = sorter.sort_by_category_and_package(
                changes(&[(7, "[Core] Add second"), (7, "[Core] Add first")]),
                priority,
            );
            assert_eq!(
                titles(&sorted),
                vec!["Add second", "Add first"],
                "priority: {priority:?}"
            );
        }
    }

    #[test]
    fn tag_sort_is_stable_within_groups() {
        let input = vec![
            tagged(10, "Add a", Some("v1.0.0")),
            tagged(4, "Add b", None),
            tagged(8, "Add c", Some("v2.0.0")),
            tagged(2, "Add d", Some("v1.0.0")),
            tagged(1, "Add e", None),
        ];

        let sorted = ChangeSorter::default().sort_by_tags(input);

        assert_eq!(ids(&sorted), vec![4, 1, 8, 10, 2]);
    }

    #[test]
    fn unreleased_can_go_last() {
        let input = vec![
            tagged(1, "Add a", None),
            tagged(2, "Add b", Some("v1.0.0")),
        ];

        let sorted =
            ChangeSorter::new(UnreleasedPosition::Last).sort_by_tags(input);

        assert_eq!(ids(&sorted), vec![2, 1]);
    }

    #[test]
    fn tag_groups_are_ordered_by_version_not_text() {
        let input = vec![
            tagged(1, "Add a", Some("v1.9.0")),
            tagged(2, "Add b", Some("v1.10.0")),
            tagged(3, "Add c", Some("nightly")),
        ];

        let sorted = ChangeSorter::default().sort_by_tags(input);

        assert_eq!(ids(&sorted), vec![2, 1, 3]);
    }

    #[test]
    fn attach_tags_keeps_existing_tags() {
        let mut input = vec![
            tagged(1, "Add a", Some("v0.9.0")),
            tagged(2, "Add b", None),
        ];
        let resolver = TagResolver::new(vec![ReleaseTag {
            name: "v1.0.0".into(),
            created_at: datetime("2099-01-01T00:00:00Z"),
        }]);

        ChangeSorter::default().attach_tags(&mut input, &resolver);

        assert_eq!(input[0].tag(), Some("v0.9.0"));
        assert_eq!(input[1].tag(), Some("v1.0.0"));
    }
}
