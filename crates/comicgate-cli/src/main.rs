//! Comicgate CLI main entry point

use clap::Parser;
use comicgate_cli::{
    cli::{Cli, Commands},
    commands::{serve, Lookup, LookupCommand},
    error::CliResult,
    utils::{init_tracing, ColoredOutput},
};
use tracing::info;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", ColoredOutput::error("Error:"), e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    info!("Comicgate CLI v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { args } => serve::execute(args).await,

        Commands::Character { id, gateway } => {
            LookupCommand::run(gateway, Lookup::Character { id }).await
        }

        Commands::Characters { query, gateway } => {
            LookupCommand::run(gateway, Lookup::characters(&query.params)?).await
        }

        Commands::Comics { character_id, query, gateway } => {
            LookupCommand::run(gateway, Lookup::comics(character_id, &query.params)?).await
        }

        Commands::Series { character_id, query, gateway } => {
            LookupCommand::run(gateway, Lookup::series(character_id, &query.params)?).await
        }
    }
}
