//! Subcommand implementations

pub mod migrate;
pub mod serve;

pub use migrate::run_migrate;
pub use serve::run_serve;

use anyhow::{Context, Result};
use stagebook_server::db::PgStore;

/// Connect to Postgres, naming every source the URL can come from when none is set.
async fn connect(database_url: Option<String>, max_connections: u32) -> Result<PgStore> {
    let database_url = database_url.context(
        "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, .env, or stagebook.toml",
    )?;

    PgStore::connect(&database_url, max_connections)
        .await
        .context("Failed to connect to the database")
}
