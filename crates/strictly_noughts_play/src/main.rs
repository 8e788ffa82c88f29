//! `noughts` - play tic-tac-toe in the terminal.

use anyhow::Result;
use clap::Parser;
use strictly_noughts_play::{Cli, PlayConfig, Referee, terminal};
use tokio::io::BufReader;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();
    run(cli).await
}

/// Logs go to stderr; stdout belongs to the board.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[instrument(skip_all, fields(config_path = %cli.config.display()))]
async fn run(cli: Cli) -> Result<()> {
    let config = PlayConfig::load_or_default(&cli.config)?;
    let config = cli.apply_overrides(config);
    config.validate()?;

    let table = cli.initial_table();
    info!(phase = %table.phase(), "Starting noughts");

    let (handle, events, referee) = Referee::spawn(table, config.computer().clone());
    terminal::run(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        handle,
        events,
    )
    .await?;

    // Dropping the last handle closes the request channel and stops the referee.
    referee.await??;
    Ok(())
}
