#![cfg_attr(not(test), forbid(unsafe_code))]

//! Main entry point for the Courier backend CLI.

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use shared::config::server::Config;
use std::error::Error;
use std::path::PathBuf;

/// Main CLI structure for the Courier server
#[derive(Debug, Parser)]
#[command(name = "courier")]
#[command(about = "Backend server for the Courier messaging platform", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands for the Courier CLI
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the backend server
    Serve {
        /// The port number to bind the server to; overrides the configuration file.
        #[arg(long, short)]
        port: Option<u16>,

        /// Path to the TOML configuration file. Defaults are used when omitted.
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}

async fn handle_serve_command(
    port: Option<u16>,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let resolved_config = Config::load_config(config, port)?;
    server::server::run(resolved_config).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, config } => handle_serve_command(port, config).await,
    }
}
