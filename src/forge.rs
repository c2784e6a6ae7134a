//! Remote repository host access.
//!
//! Fetches merged pull requests and release tags through a common trait so
//! the pipeline never depends on a concrete host client.

/// Connection and authentication settings for the remote host.
pub mod config;

/// Builds a [`manager::ForgeManager`] for a configured remote.
pub mod factory;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Wrapper enforcing watermark and ordering guarantees over any forge.
pub mod manager;

/// Records returned by forge implementations.
pub mod request;

/// Common traits for forge platform abstraction.
pub mod traits;
