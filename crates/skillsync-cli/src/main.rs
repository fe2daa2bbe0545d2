mod cli;
mod config;
mod output;
mod service;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::Config;
use service::CliService;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;

    // Create and run the command
    let service = CliService::new(config, cli);
    service.run().await
}
