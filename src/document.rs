//! Splices dumped content into an existing changelog at the placeholder.
use crate::{Result, error::LinkerError};

/// Marks where new content is inserted. Kept in place across runs.
pub const CHANGELOG_PLACEHOLDER: &str = "<!-- changelog-linker -->";

/// Opens a block of dumped content.
pub const DUMPED_CONTENT_START: &str = "<!-- dumped content start -->";

/// Closes a block of dumped content.
pub const DUMPED_CONTENT_END: &str = "<!-- dumped content end -->";

pub struct ChangelogDocumentUpdater;

impl ChangelogDocumentUpdater {
    /// Builds a new document from the existing one with `content` inserted
    /// right after the first placeholder, wrapped in start/end markers.
    /// Earlier blocks stay below the new one.
    pub fn update(existing: &str, content: &str) -> Result<String> {
        let Some(start) = existing.find(CHANGELOG_PLACEHOLDER) else {
            return Err(LinkerError::missing_placeholder(CHANGELOG_PLACEHOLDER));
        };

        let end = start + CHANGELOG_PLACEHOLDER.len();
        let (prefix, suffix) = (&existing[..start], &existing[end..]);

        let block = format!(
            "\n\n{DUMPED_CONTENT_START}\n{}\n{DUMPED_CONTENT_END}",
            content.trim()
        );

        Ok(format!("{prefix}{CHANGELOG_PLACEHOLDER}{block}{suffix}"))
    }
}
