// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! plaza - personality agent and marketplace API.
//!
//! This is the binary entry point.

mod serve;
mod shell;
mod wiring;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use plaza_config::PlazaConfig;

/// plaza - personality agent and marketplace API.
#[derive(Parser, Debug)]
#[command(name = "plaza", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway (default).
    Serve,
    /// Chat with the agent in an interactive REPL.
    Chat,
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => plaza_config::load_and_validate_path(path),
        None => plaza_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            plaza_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) | None => serve::run_serve(config).await,
        Some(Commands::Chat) => shell::run_chat(config).await,
        Some(Commands::Config) => print_config(&config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Prints the effective config with the API key redacted.
fn print_config(config: &PlazaConfig) -> Result<(), plaza_core::PlazaError> {
    print!("{}", render_config(config)?);
    Ok(())
}

fn render_config(config: &PlazaConfig) -> Result<String, plaza_core::PlazaError> {
    let mut shown = config.clone();
    if shown.openai.api_key.is_some() {
        shown.openai.api_key = Some("<redacted>".to_string());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| plaza_core::PlazaError::Internal(format!("failed to render config: {e}")))
}
