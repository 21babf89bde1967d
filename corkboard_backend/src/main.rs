use anyhow::Result;
use clap::{Parser, Subcommand};
use corkboard_backend::api;
use corkboard_backend::bootstrap;
use corkboard_backend::config::CorkboardConfig;
use corkboard_backend::telemetry;

#[derive(Parser)]
#[command(author, version, about = "Corkboard backend daemon")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (Axum) for REST access
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let args = Args::parse();
    let config = CorkboardConfig::from_env()?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let database = bootstrap::initialize(&config)?;
            api::serve_http(config, database).await
        }
    }
}
