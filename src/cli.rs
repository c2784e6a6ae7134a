//! CLI argument parsing and remote repository configuration.
use clap::{ArgMatches, Parser, Subcommand, parser::ValueSource};
use git_url_parse::GitUrl;
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::{
    LinkerError, Result, changes::sorter::SortPriority,
    forge::config::RemoteConfig,
};

/// Name of the dump-merges subcommand as typed on the command line.
pub const DUMP_MERGES_COMMAND: &str = "dump-merges";

const IN_PACKAGES_ARG: &str = "in_packages";
const IN_CATEGORIES_ARG: &str = "in_categories";

/// Global CLI arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Changelog subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dump pull requests merged since the last one in the changelog.
    DumpMerges(DumpMergesArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct DumpMergesArgs {
    #[arg(long, default_value = "")]
    /// GitHub repository URL (https://github.com/owner/repo). Falls back to
    /// `repository` in changelog-linker.toml.
    pub github_repo: String,

    #[arg(long, default_value = "")]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long)]
    /// API base URL for GitHub Enterprise instances.
    pub api_url: Option<String>,

    #[arg(long)]
    /// Changelog to update. Overrides `changelog.path` in the config file.
    pub changelog: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    /// Group entries under category headings.
    pub in_categories: bool,

    #[arg(long, default_value_t = false)]
    /// Group entries under package headings.
    pub in_packages: bool,

    #[arg(long, default_value_t = false)]
    /// Group entries under release tag headings.
    pub in_tags: bool,

    #[arg(long, default_value_t = false)]
    /// Print the dumped content instead of writing the changelog.
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    /// Turn references and mentions into links.
    pub linkify: bool,
}

impl DumpMergesArgs {
    /// Configure remote repository connection from CLI arguments, using
    /// `fallback_repo` when no repository was passed.
    pub fn get_remote(
        &self,
        fallback_repo: Option<&str>,
    ) -> Result<RemoteConfig> {
        let repo = if self.github_repo.is_empty() {
            fallback_repo.unwrap_or_default()
        } else {
            self.github_repo.as_str()
        };

        if repo.is_empty() {
            return Err(LinkerError::InvalidArgs(
                "must configure a github repository with --github-repo or in changelog-linker.toml".into(),
            ));
        }

        get_github_remote(
            repo,
            &self.github_token,
            env::var("GITHUB_TOKEN").ok(),
            self.api_url.clone(),
        )
    }
}

/// Which of `--in-packages` / `--in-categories` leads, from the order the
/// flags were typed in. Ties and unknown positions go to packages.
pub fn sort_priority(matches: &ArgMatches) -> SortPriority {
    let position = |id: &str| {
        (matches.value_source(id) == Some(ValueSource::CommandLine))
            .then(|| matches.index_of(id).unwrap_or(usize::MAX))
    };

    SortPriority::from_flag_order(
        position(IN_PACKAGES_ARG),
        position(IN_CATEGORIES_ARG),
    )
}

/// Validate repository URL uses HTTP or HTTPS scheme.
fn validate_scheme(scheme: git_url_parse::Scheme) -> Result<()> {
    match scheme {
        git_url_parse::Scheme::Http => Ok(()),
        git_url_parse::Scheme::Https => Ok(()),
        _ => Err(LinkerError::InvalidRemoteUrl(
            "only http and https schemes are supported for repo urls".into(),
        )),
    }
}

/// First non-empty token of: argument, token embedded in the URL,
/// environment. `None` means anonymous access.
fn resolve_token(
    arg_token: &str,
    url_token: Option<String>,
    env_token: Option<String>,
) -> Option<SecretString> {
    [Some(arg_token.to_string()), url_token, env_token]
        .into_iter()
        .flatten()
        .find(|token| !token.is_empty())
        .map(SecretString::from)
}

/// Configure GitHub remote with URL parsing and token resolution.
fn get_github_remote(
    github_repo: &str,
    github_token: &str,
    env_token: Option<String>,
    api_url: Option<String>,
) -> Result<RemoteConfig> {
    let parsed = GitUrl::parse(github_repo)?;

    validate_scheme(parsed.scheme)?;

    let token = resolve_token(github_token, parsed.token.clone(), env_token);

    let host = parsed.host.clone().ok_or_else(|| {
        LinkerError::InvalidRemoteUrl(format!(
            "unable to parse host from github repo: {github_repo}"
        ))
    })?;

    let host = match parsed.port {
        Some(port) => format!("{host}:{port}"),
        None => host,
    };

    let owner = parsed.owner.clone().ok_or_else(|| {
        LinkerError::InvalidRemoteUrl(format!(
            "unable to parse owner from github repo: {github_repo}"
        ))
    })?;

    Ok(RemoteConfig {
        host,
        scheme: parsed.scheme.to_string(),
        owner,
        repo: parsed.name,
        token,
        api_url,
    })
}
