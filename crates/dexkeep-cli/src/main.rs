//! CLI entry point - the composition root.
//!
//! Builds the context via bootstrap, dispatches one command, and flushes
//! pending collection writes before exit.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use dexkeep_cli::{Cli, CliConfig, CliContext, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(ctx: &CliContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Lookup { query } => handlers::lookup::execute(ctx, &query).await,
        Commands::Favorites { command } => handlers::favorites::execute(ctx, command).await,
        Commands::Groups { command } => handlers::groups::execute(ctx, command).await,
    }
}

fn report(err: &anyhow::Error) -> ExitCode {
    eprintln!("Error: {err:#}");
    let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CliConfig::from_cli(&cli);

    let Some(command) = cli.command else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("{e}");
        }
        return ExitCode::SUCCESS;
    };

    let ctx = match bootstrap(config).await {
        Ok(ctx) => ctx,
        Err(e) => return report(&e),
    };

    let result = dispatch(&ctx, command).await;

    // Scheduled snapshot writes land before the runtime shuts down.
    ctx.app().flush().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}
