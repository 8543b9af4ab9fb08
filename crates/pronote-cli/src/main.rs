use std::process::ExitCode;

use clap::Parser;
use pronote_auth::SessionManager;
use pronote_core::responses::ErrorResponse;
use pronote_normalize::FetchOptions;

mod bootstrap;
mod cli;
mod commands;
mod output;
mod portal;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    if let Err(error) = init_tracing(flags.quiet, flags.verbose) {
        eprintln!("pronote: {error:#}");
    }

    match run(cli, &flags).await {
        Ok(code) => code,
        Err(error) => {
            tracing::error!("{error:#}");
            let response = ErrorResponse {
                error: format!("{error:#}"),
            };
            if let Err(render_error) = output::output(&response, flags.format) {
                eprintln!("pronote: {render_error:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: cli::Cli, flags: &cli::GlobalFlags) -> anyhow::Result<ExitCode> {
    if matches!(cli.command, cli::Commands::Schema) {
        return commands::schema::handle(flags);
    }

    let config = bootstrap::load_config()?;
    let store = bootstrap::open_store(&config).await?;
    let portal = bootstrap::select_portal(&config.portal, cli.command.needs_portal())?;
    let fetch = FetchOptions::from_config(&config.sync, pronote_normalize::windows::today());
    let manager = SessionManager::new(&portal, &store, fetch);

    commands::dispatch(cli.command, &manager, flags).await
}

/// Logs go to stderr. Stdout carries exactly one JSON document.
fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PRONOTE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
