//! Demo commands

mod onboard;
mod service;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Demo subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Provision test fixtures and push a fresh credential to the agent
    Onboard,
    /// Create a tenant service using the onboarded fixtures
    Service,
}

/// Route a demo subcommand to its handler
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Onboard => onboard::run(config).await,
        Commands::Service => service::run(config).await,
    }
}
