use derive_builder::Builder;
use log::*;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    rc::Rc,
};
use tokio::fs;

use crate::{
    LinkerError, Result,
    analyzer::IdsAnalyzer,
    changes::{
        change::Change, factory::ChangeFactory, sorter::ChangeSorter,
        tags::TagResolver,
    },
    document::{CHANGELOG_PLACEHOLDER, ChangelogDocumentUpdater},
    forge::manager::ForgeManager,
    linker::ContentLinker,
    orchestrator::config::OrchestratorConfig,
    report::ChangelogReportRenderer,
};

pub mod config;


/// How a run of the pipeline ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing newer than the watermark was merged; the changelog is untouched.
    NoNewChanges { watermark: u64 },
    /// Rendered content that would have been inserted.
    DryRun { content: String, count: usize },
    /// Content was inserted into the changelog at `path`.
    Written { path: PathBuf, count: usize },
}

#[derive(Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct OrchestratorParams {
    pub config: Rc<OrchestratorConfig>,
    pub forge: Rc<ForgeManager>,
}

impl OrchestratorParamsBuilder {
    pub fn build(&self) -> Result<Orchestrator> {
        let params = self._build().map_err(|e| {
            LinkerError::invalid_config(format!(
                "Failed to build orchestrator: {}",
                e
            ))
        })?;
        Orchestrator::new(params)
    }
}

/// Drives one changelog update: watermark, fetch, classify, sort, render,
/// link and write.
pub struct Orchestrator {
    config: Rc<OrchestratorConfig>,
    forge: Rc<ForgeManager>,
    factory: ChangeFactory,
    sorter: ChangeSorter,
    renderer: ChangelogReportRenderer,
    linker: Option<ContentLinker>,
}

impl Orchestrator {
    pub fn builder() -> OrchestratorParamsBuilder {
        OrchestratorParamsBuilder::default()
    }

    pub fn new(params: OrchestratorParams) -> Result<Self> {
        let config = params.config;

        let renderer = ChangelogReportRenderer::new(
            &config.entry_template,
            config.authors_to_ignore.clone(),
        )?;

        let linker = if config.linkify {
            Some(ContentLinker::new(
                config.repository_url.as_str(),
                config.user_base_url.as_str(),
                config.names_to_urls.clone(),
            )?)
        } else {
            None
        };

        Ok(Self {
            sorter: ChangeSorter::new(config.unreleased_position),
            factory: ChangeFactory::new(),
            forge: params.forge,
            config,
            renderer,
            linker,
        })
    }

    /// Dumps pull requests merged since the last recorded one into the
    /// changelog. Nothing is written unless every step before it succeeded.
    pub async fn dump_merges(&self) -> Result<RunOutcome> {
        let path = &self.config.changelog_path;

        let watermark = IdsAnalyzer::highest_id_in_file(path).await?;
        info!("highest pull request in {}: #{watermark}", path.display());

        let pull_requests =
            self.forge.list_merged_pull_requests_since(watermark).await?;

        if pull_requests.is_empty() {
            info!("no new merged pull requests since #{watermark}");
            return Ok(RunOutcome::NoNewChanges { watermark });
        }

        let changes = pull_requests
            .iter()
            .map(|pr| self.factory.create_from_pull_request(pr))
            .collect::<Vec<Change>>();

        let changes = self.sort_changes(changes).await?;
        let count = changes.len();

        let mut content = self.renderer.render(&changes, &self.config.report)?;

        if let Some(linker) = &self.linker {
            debug!("linking references in rendered content");
            content = linker.linkify(&content);
        }

        if self.config.dry_run {
            info!("dry run: {count} changes not written");
            return Ok(RunOutcome::DryRun { content, count });
        }

        Self::write_changelog(path, &content).await?;
        info!("dumped {count} changes into {}", path.display());

        Ok(RunOutcome::Written {
            path: path.clone(),
            count,
        })
    }

    async fn sort_changes(&self, changes: Vec<Change>) -> Result<Vec<Change>> {
        let mut changes = self
            .sorter
            .sort_by_category_and_package(changes, self.config.report.priority);

        if !self.config.report.show_tags {
            return Ok(changes);
        }

        let tags = self.forge.list_release_tags().await?;
        debug!("resolving release tags from {} tags", tags.len());

        self.sorter
            .attach_tags(&mut changes, &TagResolver::new(tags));

        Ok(self.sorter.sort_by_tags(changes))
    }

    /// Splices content into the changelog and swaps the file in with a
    /// rename so readers never see a half-written document.
    async fn write_changelog(path: &Path, content: &str) -> Result<()> {
        let existing = match fs::read_to_string(path).await {
            Ok(existing) => existing,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(LinkerError::missing_placeholder(
                    CHANGELOG_PLACEHOLDER,
                ));
            }
            Err(err) => return Err(err.into()),
        };

        let updated = ChangelogDocumentUpdater::update(&existing, content)?;

        Self::replace_file(path, updated).await
    }

    /// Writes a sibling temp file and renames it over `path`. The temp file
    /// is removed again when either step fails.
    async fn replace_file(path: &Path, content: String) -> Result<()> {
        let file_name = path.file_name().ok_or_else(|| {
            LinkerError::invalid_config(format!(
                "changelog path has no file name: {}",
                path.display()
            ))
        })?;

        let tmp_path = path
            .with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

        let result: std::io::Result<()> = async {
            fs::write(&tmp_path, content).await?;
            fs::rename(&tmp_path, path).await
        }
        .await;

        if let Err(err) = result {
            if let Err(cleanup) = fs::remove_file(&tmp_path).await
                && cleanup.kind() != ErrorKind::NotFound
            {
                warn!(
                    "failed to remove temp file {}: {cleanup}",
                    tmp_path.display()
                );
            }
            return Err(err.into());
        }

        Ok(())
    }
}
