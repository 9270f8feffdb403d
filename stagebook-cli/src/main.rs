//! stagebook CLI - run and maintain the venue/artist/show booking service
//!
//! - `serve`: HTTP API over Postgres (or an in-memory store)
//! - `migrate`: create the schema

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "stagebook",
    author,
    version,
    about = "Book shows that pair artists with venues",
    long_about = "List venues and artists, book shows between them, and see each \
                  venue's and artist's past and upcoming shows over a JSON HTTP API."
)]
struct Cli {
    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the database schema if it is missing
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing so clap's `env` attributes see .env values
    let env_files = config::load_dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    if env_files.is_empty() {
        debug!("No .env files found (current dir or ~/.stagebook)");
    } else {
        for path in &env_files {
            info!("Loaded environment from {}", path.display());
        }
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
    }
    Ok(())
}
