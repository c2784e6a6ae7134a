//! Configuration loading and parsing for `changelog-linker.toml` files.
//!
//! Every field is optional; a missing file yields the defaults.
use log::*;
use serde::Deserialize;
use std::{collections::BTreeMap, io::ErrorKind, path::Path};
use tokio::fs;

use crate::{
    Result, changes::sorter::UnreleasedPosition, report::DEFAULT_ENTRY_TEMPLATE,
};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "changelog-linker.toml";

/// Default changelog document path.
pub const DEFAULT_CHANGELOG_PATH: &str = "CHANGELOG.md";

/// Changelog document and entry rendering configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)] // Use default for missing fields
pub struct ChangelogConfig {
    /// Path of the changelog document to update.
    pub path: String,
    /// Where the group of untagged changes goes when grouping by tag.
    pub unreleased: UnreleasedPosition,
    /// Authors never thanked in entries (case-insensitive).
    pub authors_to_ignore: Vec<String>,
    /// Tera template for a single entry.
    pub entry: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_CHANGELOG_PATH.into(),
            unreleased: UnreleasedPosition::default(),
            authors_to_ignore: vec![],
            entry: DEFAULT_ENTRY_TEMPLATE.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkifyConfig {
    /// Extra names linked as whole words, mapped to their URL.
    pub names: BTreeMap<String, String>,
}

/// Root configuration structure for `changelog-linker.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository URL used when none is given on the command line.
    pub repository: Option<String>,
    pub changelog: ChangelogConfig,
    pub linkify: LinkifyConfig,
}

impl Config {
    /// Loads the configuration file at `path`, falling back to defaults when
    /// it does not exist.
    pub async fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path).await {
            Ok(content) => {
                debug!("loading configuration from {}", path.display());
                Ok(toml::from_str(&content)?)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no {} found: using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LinkerError;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert!(config.repository.is_none());
        assert_eq!(config.changelog.path, DEFAULT_CHANGELOG_PATH);
        assert_eq!(config.changelog.unreleased, UnreleasedPosition::First);
        assert_eq!(config.changelog.entry, DEFAULT_ENTRY_TEMPLATE);
        assert!(config.changelog.authors_to_ignore.is_empty());
        assert!(config.linkify.names.is_empty());
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
repository = "https://github.com/symplify/symplify"

[changelog]
path = "docs/CHANGELOG.md"
unreleased = "last"
authors_to_ignore = ["TomasVotruba"]

[linkify.names]
Symfony = "https://symfony.com"
"#;

        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(
            config.repository.as_deref(),
            Some("https://github.com/symplify/symplify")
        );
        assert_eq!(config.changelog.path, "docs/CHANGELOG.md");
        assert_eq!(config.changelog.unreleased, UnreleasedPosition::Last);
        assert_eq!(config.changelog.authors_to_ignore, vec!["TomasVotruba"]);
        assert_eq!(config.changelog.entry, DEFAULT_ENTRY_TEMPLATE);
        assert_eq!(
            config.linkify.names.get("Symfony").map(String::as_str),
            Some("https://symfony.com")
        );
    }

    #[test]
    fn test_invalid_unreleased_position() {
        let result =
            toml::from_str::<Config>("[changelog]\nunreleased = \"middle\"");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = Config::load(&dir.path().join(DEFAULT_CONFIG_FILE))
            .await
            .unwrap();

        assert_eq!(config.changelog.path, DEFAULT_CHANGELOG_PATH);
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[changelog\npath = 1").unwrap();

        let result = Config::load(&path).await;

        assert!(matches!(result, Err(LinkerError::TomlParseError(_))));
    }
}
