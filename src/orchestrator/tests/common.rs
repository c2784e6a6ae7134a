//! Common test utilities for orchestrator tests.

use std::{path::Path, rc::Rc};
use tempfile::TempDir;

use crate::{
    Orchestrator, OrchestratorConfig,
    config::Config,
    forge::{manager::ForgeManager, traits::MockForge},
    orchestrator::{OrchestratorParams, config::OrchestratorConfigParamsBuilder},
};

pub use crate::{
    error::LinkerError,
    orchestrator::RunOutcome,
    test_helpers::{create_test_pull_request, datetime},
};

pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

pub const CHANGELOG_WITH_PLACEHOLDER: &str =
    "# Changelog\n\n<!-- changelog-linker -->\n\n## v1.0.0\n\n- [#120] Add initial release\n";

/// Creates a MockForge with no expectations set.
pub fn create_mock_forge() -> MockForge {
    MockForge::new()
}

/// Writes a changelog into a fresh temp dir and returns both.
pub fn create_changelog(content: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CHANGELOG_FILE), content).unwrap();
    dir
}

pub fn read_changelog(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(CHANGELOG_FILE)).unwrap()
}

/// Config builder pointing at the changelog in `dir` with no grouping.
pub fn config_builder(dir: &Path) -> OrchestratorConfigParamsBuilder {
    let mut builder = OrchestratorConfig::builder();
    builder
        .toml_config(Rc::new(Config::default()))
        .repository_url("https://github.com/test/repo")
        .user_base_url("https://github.com")
        .changelog_path(Some(dir.join(CHANGELOG_FILE)));
    builder
}

/// Creates a test Orchestrator with the provided mock forge and config.
///
/// # Example
/// ```ignore
/// let mut mock_forge = create_mock_forge();
/// mock_forge
///     .expect_list_merged_pull_requests_since()
///     .returning(|_| Ok(vec![]));
/// let orchestrator =
///     create_test_orchestrator(mock_forge, config_builder(dir));
/// ```
pub fn create_test_orchestrator(
    mock_forge: MockForge,
    builder: OrchestratorConfigParamsBuilder,
) -> Orchestrator {
    let config = Rc::new(builder.build().unwrap());
    let forge = Rc::new(ForgeManager::new(Box::new(mock_forge)));

    Orchestrator::new(OrchestratorParams { config, forge }).unwrap()
}
