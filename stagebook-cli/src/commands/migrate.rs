//! Apply the database schema

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::StagebookConfig;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Path to a TOML config file (default: ./stagebook.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Create the venues, artists and shows tables if they are missing
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let config = StagebookConfig::load(args.config.as_deref())?;
    let store = super::connect(
        args.database_url.or(config.database_url),
        config.max_connections,
    )
    .await?;

    store.migrate().await.context("Failed to apply schema")?;
    tracing::info!("Schema is up to date");
    Ok(())
}
