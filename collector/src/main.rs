use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod repositories;
mod services;
mod state;
#[cfg(test)]
mod test_support;

use crate::commands::{
    handle_clear, handle_export, handle_ingest, handle_report, handle_setup, handle_status,
    Command,
};
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "collector")]
#[command(about = "Exchange rate and stock price collector", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let app_state = AppState::new().await?;
    tracing::info!("AppState initialized");

    match cli.command {
        Command::Setup => handle_setup(&app_state).await,
        Command::Ingest { target, start, end } => {
            handle_ingest(&app_state, target, start, end).await
        }
        Command::Export { dir } => handle_export(&app_state, dir).await,
        Command::Report { out } => handle_report(&app_state, out).await,
        Command::Status => handle_status(&app_state).await,
        Command::Clear => handle_clear(&app_state).await,
    }
}
