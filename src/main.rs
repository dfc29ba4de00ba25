use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod handlers;
mod router;
mod schemas;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load .env before clap so env-backed arguments pick it up
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.run().await?;

    Ok(())
}
