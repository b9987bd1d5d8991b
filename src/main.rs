//! Main entry point for the relay.
//!
//! This module loads environment variables, parses the command line,
//! initializes logging, loads the persona configuration and starts the
//! HTTP server exposing the chat and contact endpoints.

mod api;
mod cli;
mod config;
mod constants;
mod core;
mod email;
mod errors;
mod llm;
mod utils;

use clap::Parser;
use tracing::error;

/// Main entry point that initializes and runs the application.
///
/// # Initialization steps:
/// 1. Load environment variables from `.env`
/// 2. Parse CLI arguments (falling back to the environment)
/// 3. Initialize logging system
/// 4. Load the persona configuration
/// 5. Serve until shutdown
#[tokio::main]
async fn main() {
    let dotenv_result = dotenvy::dotenv();

    let cli = cli::Cli::parse();
    let _log_guard = utils::init_logging(&cli.logging_level, cli.log_to_file);

    if let Err(e) = dotenv_result {
        tracing::debug!("No .env file loaded: {}", e);
    }

    let prompt = match config::load_prompt_config(&cli.persona_config) {
        Ok(prompt) => prompt,
        Err(e) => {
            error!(
                "Failed to load persona configuration '{}': {}",
                cli.persona_config, e
            );
            std::process::exit(1);
        }
    };

    let relay_config = match config::RelayConfig::from_cli(cli, prompt) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = api::server::launch_server(relay_config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
