//! foundry-agents — demo runners for the Azure AI Foundry agent control
//! plane: register, list, test, and delete agents, and exercise the hosted
//! relay agent.

mod commands;

use clap::Parser;
use commands::{execute, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    execute(cli).await
}
