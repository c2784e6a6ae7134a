use changelog_linker::{Result, cli, command};
use clap::{CommandFactory, FromArgMatches};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("changelog_linker")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    // raw matches are kept to read the order grouping flags were given in
    let matches = cli::Args::command().get_matches();
    let cli_args =
        cli::Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    initialize_logger(cli_args.debug)?;

    match &cli_args.command {
        cli::Command::DumpMerges(args) => {
            let priority = matches
                .subcommand_matches(cli::DUMP_MERGES_COMMAND)
                .map(cli::sort_priority)
                .unwrap_or_default();

            command::dump_merges::execute(args, priority).await?;
        }
    }

    Ok(())
}
