use derive_builder::Builder;
use std::{collections::BTreeMap, path::PathBuf, rc::Rc};
use url::Url;

use crate::{
    LinkerError, Result,
    changes::sorter::{SortPriority, UnreleasedPosition},
    config::Config,
    report::ReportOptions,
};

#[derive(Debug, Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct OrchestratorConfigParams {
    pub toml_config: Rc<Config>,
    pub repository_url: String,
    pub user_base_url: String,
    /// Overrides the changelog path from the toml config.
    #[builder(default)]
    pub changelog_path: Option<PathBuf>,
    #[builder(default)]
    pub in_categories: bool,
    #[builder(default)]
    pub in_packages: bool,
    #[builder(default)]
    pub in_tags: bool,
    /// Explicit priority. Derived from the grouping flags when unset.
    #[builder(default)]
    pub priority: Option<SortPriority>,
    #[builder(default)]
    pub dry_run: bool,
    #[builder(default)]
    pub linkify: bool,
}

impl OrchestratorConfigParamsBuilder {
    pub fn build(&self) -> Result<OrchestratorConfig> {
        let params = self._build().map_err(|e| {
            LinkerError::invalid_config(format!(
                "Failed to build orchestrator config: {}",
                e
            ))
        })?;
        OrchestratorConfig::new(params)
    }
}

#[derive(Debug)]
pub struct OrchestratorConfig {
    pub changelog_path: PathBuf,
    pub report: ReportOptions,
    pub dry_run: bool,
    pub linkify: bool,
    pub unreleased_position: UnreleasedPosition,
    pub authors_to_ignore: Vec<String>,
    pub entry_template: String,
    pub names_to_urls: BTreeMap<String, String>,
    pub repository_url: Url,
    pub user_base_url: Url,
}

impl OrchestratorConfig {
    pub fn builder() -> OrchestratorConfigParamsBuilder {
        OrchestratorConfigParamsBuilder::default()
    }

    pub fn new(params: OrchestratorConfigParams) -> Result<Self> {
        let repository_url =
            Self::parse_url("repository", &params.repository_url)?;
        let user_base_url =
            Self::parse_url("user base", &params.user_base_url)?;

        let changelog = &params.toml_config.changelog;

        if changelog.entry.trim().is_empty() {
            return Err(LinkerError::invalid_config(
                "changelog entry template must not be empty",
            ));
        }

        let changelog_path = params
            .changelog_path
            .unwrap_or_else(|| PathBuf::from(&changelog.path));

        let priority = params.priority.unwrap_or_else(|| {
            SortPriority::from_flags(params.in_packages, params.in_categories)
        });

        Ok(Self {
            changelog_path,
            report: ReportOptions {
                show_categories: params.in_categories,
                show_packages: params.in_packages,
                show_tags: params.in_tags,
                priority,
            },
            dry_run: params.dry_run,
            linkify: params.linkify,
            unreleased_position: changelog.unreleased,
            authors_to_ignore: changelog.authors_to_ignore.clone(),
            entry_template: changelog.entry.clone(),
            names_to_urls: params.toml_config.linkify.names.clone(),
            repository_url,
            user_base_url,
        })
    }

    fn parse_url(name: &str, value: &str) -> Result<Url> {
        Url::parse(value).map_err(|e| {
            LinkerError::invalid_config(format!(
                "invalid {name} url {value:?}: {e}"
            ))
        })
    }
}
