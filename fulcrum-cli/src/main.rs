//! Fulcrum demo CLI
//!
//! One-off onboarding and demo commands run against a local Fulcrum Core,
//! process manager, and CFM agent.

mod api;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "fulcrum-demo")]
#[command(about = "Fulcrum CFM agent demo CLI", long_about = None)]
struct Cli {
    /// Fulcrum Core API base URL
    #[arg(
        long,
        env = "FULCRUM_CORE_URL",
        default_value = "http://localhost:8080/api/v1"
    )]
    fulcrum_core_url: String,

    /// Process-manager base URL
    #[arg(long, env = "PMANAGER_URL", default_value = "http://localhost:8181")]
    pmanager_url: String,

    /// CFM agent management API base URL
    #[arg(long, env = "CFM_AGENT_URL", default_value = "http://localhost:8383")]
    agent_url: String,

    /// Admin token for Fulcrum Core
    #[arg(long, env = "FULCRUM_ADMIN_TOKEN", default_value = "admin-test-token")]
    admin_token: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        fulcrum_core_url: cli.fulcrum_core_url,
        pmanager_url: cli.pmanager_url,
        agent_url: cli.agent_url,
        admin_token: cli.admin_token,
    };

    handle_command(cli.command, &config).await
}
