//! Dump merged pull requests into the changelog.
use log::*;
use std::{path::Path, rc::Rc};

use crate::{
    Orchestrator, OrchestratorConfig, Result,
    changes::sorter::SortPriority,
    cli::DumpMergesArgs,
    config::{Config, DEFAULT_CONFIG_FILE},
    forge::factory::ForgeFactory,
    orchestrator::RunOutcome,
};

/// Read the watermark, fetch newer merged pull requests and insert them
/// into the changelog, or print them on a dry run.
pub async fn execute(
    args: &DumpMergesArgs,
    priority: SortPriority,
) -> Result<()> {
    let toml_config =
        Rc::new(Config::load(Path::new(DEFAULT_CONFIG_FILE)).await?);

    let remote_config = args.get_remote(toml_config.repository.as_deref())?;

    let config = Rc::new(
        OrchestratorConfig::builder()
            .toml_config(Rc::clone(&toml_config))
            .repository_url(remote_config.repository_url())
            .user_base_url(remote_config.link_base_url())
            .changelog_path(args.changelog.clone())
            .in_categories(args.in_categories)
            .in_packages(args.in_packages)
            .in_tags(args.in_tags)
            .priority(priority)
            .dry_run(args.dry_run)
            .linkify(args.linkify)
            .build()?,
    );

    let forge = Rc::new(ForgeFactory::create(&remote_config).await?);

    let orchestrator = Orchestrator::builder()
        .config(config)
        .forge(forge)
        .build()?;

    match orchestrator.dump_merges().await? {
        RunOutcome::NoNewChanges { watermark } => {
            info!(
                "changelog is up to date: nothing merged after #{watermark}"
            );
        }
        RunOutcome::DryRun { content, count } => {
            info!("{count} changes would be dumped");
            println!("{content}");
        }
        RunOutcome::Written { path, count } => {
            info!("{count} changes dumped into {}", path.display());
        }
    }

    Ok(())
}
