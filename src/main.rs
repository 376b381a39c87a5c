// src/main.rs
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, Command};
use commands::{handle_config_command, handle_list_command, handle_serve_command};
use ethio_football::error::AppError;
use logging::setup_logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // The guard must stay alive until exit so buffered logs are flushed
    let (log_file_path, _guard) = setup_logging(&args).await?;
    info!(
        "{} {} started, logging to {log_file_path}",
        ethio_football::NAME,
        ethio_football::VERSION
    );

    let result = match &args.command {
        Command::Serve { bind } => handle_serve_command(bind.as_deref()).await,
        Command::List(list) => handle_list_command(list).await,
        Command::Config(config) => handle_config_command(config).await,
    };

    if let Err(e) = &result {
        error!("{e}");
    }
    result
}
