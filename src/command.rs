//! Command execution for changelog-linker.
//!
//! Each subcommand wires CLI arguments and the optional
//! `changelog-linker.toml` into an [`Orchestrator`](crate::Orchestrator)
//! run and reports the outcome.

pub mod dump_merges;
