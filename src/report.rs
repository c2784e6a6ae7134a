//! Markdown rendering of sorted changes.
use serde::Serialize;

use crate::{
    Result,
    changes::{
        change::{Category, Change},
        sorter::SortPriority,
    },
};

/// Default template for a single changelog bullet.
pub const DEFAULT_ENTRY_TEMPLATE: &str = r#"- [#{{ id }}] {% if packages %}[{{ packages | join(sep=", ") }}] {% endif %}{{ title }}{% if author %}, Thanks to @{{ author }}{% endif %}"#;

/// Heading for changes without a release tag.
pub const UNRELEASED_HEADING: &str = "Unreleased";

/// Heading for changes without a package when grouping by package.
pub const UNKNOWN_PACKAGE_HEADING: &str = "Unknown Package";

const ENTRY_TEMPLATE_NAME: &str = "entry";

/// Which headings to emit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub show_categories: bool,
    pub show_packages: bool,
    pub show_tags: bool,
    pub priority: SortPriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupKey {
    Tag,
    Category,
    Package,
}

/// Template context for one bullet.
#[derive(Debug, Serialize)]
struct EntryContext<'a> {
    id: u64,
    title: &'a str,
    category: Category,
    packages: Vec<&'a str>,
    author: Option<&'a str>,
    tag: Option<&'a str>,
}

/// Renders changes as markdown bullets under optional nested headings.
pub struct ChangelogReportRenderer {
    tera: tera::Tera,
    authors_to_ignore: Vec<String>,
}

impl ChangelogReportRenderer {
    pub fn new(
        entry_template: &str,
        authors_to_ignore: Vec<String>,
    ) -> Result<Self> {
        let mut tera = tera::Tera::default();
        tera.add_raw_template(ENTRY_TEMPLATE_NAME, entry_template)?;

        Ok(Self {
            tera,
            authors_to_ignore: authors_to_ignore
                .into_iter()
                .map(|a| a.to_lowercase())
                .collect(),
        })
    }

    /// Renders every change exactly once, in input order within each group.
    /// Headings are only emitted for groups that have entries.
    pub fn render(
        &self,
        changes: &[Change],
        options: &ReportOptions,
    ) -> Result<String> {
        let keys = Self::group_keys(options);
        let changes = changes.iter().collect::<Vec<&Change>>();

        let mut lines = vec![];
        self.render_level(&mut lines, &changes, &keys, 0, options)?;

        Ok(lines.join("\n").trim_end().to_string())
    }

    fn group_keys(options: &ReportOptions) -> Vec<GroupKey> {
        let mut keys = vec![];

        if options.show_tags {
            keys.push(GroupKey::Tag);
        }

        match (options.show_categories, options.show_packages) {
            (true, true) => {
                if options.priority == SortPriority::ByCategory {
                    keys.extend([GroupKey::Category, GroupKey::Package]);
                } else {
                    keys.extend([GroupKey::Package, GroupKey::Category]);
                }
            }
            (true, false) => keys.push(GroupKey::Category),
            (false, true) => keys.push(GroupKey::Package),
            (false, false) => {}
        }

        keys
    }

    fn render_level(
        &self,
        lines: &mut Vec<String>,
        changes: &[&Change],
        keys: &[GroupKey],
        depth: usize,
        options: &ReportOptions,
    ) -> Result<()> {
        let Some((key, rest)) = keys.split_first() else {
            for change in changes {
                lines.push(self.render_entry(change, options)?);
            }
            lines.push(String::new());
            return Ok(());
        };

        // "##" for the outermost level
        let marker = "#".repeat(depth + 2);

        for (heading, group) in Self::group_by(changes, *key) {
            lines.push(format!("{marker} {heading}"));
            lines.push(String::new());
            self.render_level(lines, &group, rest, depth + 1, options)?;
        }

        Ok(())
    }

    /// Groups by key, keeping groups in order of first appearance.
    fn group_by<'c>(
        changes: &[&'c Change],
        key: GroupKey,
    ) -> Vec<(String, Vec<&'c Change>)> {
        let mut groups: Vec<(String, Vec<&'c Change>)> = vec![];

        for &change in changes {
            let heading = match key {
                GroupKey::Tag => {
                    change.tag().unwrap_or(UNRELEASED_HEADING).to_string()
                }
                GroupKey::Category => change.category().to_string(),
                GroupKey::Package => change
                    .primary_package()
                    .unwrap_or(UNKNOWN_PACKAGE_HEADING)
                    .to_string(),
            };

            match groups.iter_mut().find(|(h, _)| *h == heading) {
                Some((_, group)) => group.push(change),
                None => groups.push((heading, vec![change])),
            }
        }

        groups
    }

    fn render_entry(
        &self,
        change: &Change,
        options: &ReportOptions,
    ) -> Result<String> {
        // the heading already names the primary package
        let skip = usize::from(
            options.show_packages && change.primary_package().is_some(),
        );
        let packages = change
            .packages()
            .iter()
            .skip(skip)
            .map(String::as_str)
            .collect();

        let author = change
            .author()
            .filter(|a| !self.authors_to_ignore.contains(&a.to_lowercase()));

        let context = tera::Context::from_serialize(EntryContext {
            id: change.id(),
            title: change.title(),
            category: change.category(),
            packages,
            author,
            tag: change.tag(),
        })?;

        let entry = self.tera.render(ENTRY_TEMPLATE_NAME, &context)?;

        Ok(entry.trim_end().to_string())
    }
}
