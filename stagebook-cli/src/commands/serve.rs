//! HTTP server command
//!
//! Runs the booking API against Postgres, or against an in-memory store
//! with `--in-memory`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use stagebook_server::db::seed::seed_if_empty;
use stagebook_server::db::{MemoryStore, Store};
use stagebook_server::http::{run_server, AppState, ServerConfig};

use crate::config::StagebookConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:5000)
    #[arg(long, short = 'b', env = "STAGEBOOK_BIND")]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Keep records in memory instead of Postgres; nothing survives a restart
    #[arg(long)]
    pub in_memory: bool,

    /// Load sample venues, artists and shows into an empty store
    #[arg(long)]
    pub seed: bool,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Path to a TOML config file (default: ./stagebook.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = StagebookConfig::load(args.config.as_deref())?;

    let store: Arc<dyn Store> = if args.in_memory {
        tracing::warn!("Using in-memory store; records are lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        let store = super::connect(
            args.database_url.or(config.database_url),
            config.max_connections,
        )
        .await?;
        store.migrate().await.context("Failed to apply schema")?;
        Arc::new(store)
    };

    if args.seed {
        seed_if_empty(store.as_ref(), Utc::now())
            .await
            .context("Failed to seed sample data")?;
    }

    let server_config = ServerConfig {
        bind_addr: args.bind.unwrap_or(config.bind),
        cors_permissive: args.cors_permissive || config.cors_permissive,
        request_timeout: Duration::from_secs(config.request_timeout_secs),
    };

    tracing::info!("Starting stagebook server on {}", server_config.bind_addr);

    // Blocks until shutdown
    run_server(AppState::new(store), server_config)
        .await
        .context("Server error")?;

    Ok(())
}
