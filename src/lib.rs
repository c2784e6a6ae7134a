//! Dumps merged pull requests into a changelog: reads the highest recorded
//! pull request, fetches newer merges, classifies and groups them, renders
//! markdown, optionally links references, and inserts the result at the
//! changelog placeholder.

pub mod analyzer;
pub mod changes;
pub mod cli;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod forge;
pub mod linker;
pub mod orchestrator;
pub mod report;

pub use error::{LinkerError, Result};
pub use orchestrator::{Orchestrator, RunOutcome, config::OrchestratorConfig};

#[cfg(test)]
pub mod test_helpers;
