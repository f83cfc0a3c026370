//! HTTP server command

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use items_server::db::{create_pool, probe};
use items_server::{run_server, AppState, ItemStore, MemoryItemStore, PgItemStore};

use crate::config::{DbArgs, ListenArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub listen: ListenArgs,

    #[command(flatten)]
    pub db: DbArgs,

    /// Keep items in process memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn ItemStore> = if args.memory {
        tracing::warn!("Serving from in-memory store; items are lost on exit");
        Arc::new(MemoryItemStore::new())
    } else {
        let db_config = args.db.to_config();
        tracing::debug!(?db_config, "database configuration");

        let pool = create_pool(&db_config).context("Invalid database configuration")?;

        // Connectivity is reported, not required: requests fail with 500
        // until the database is reachable.
        let probe_pool = pool.clone();
        let target = db_config.target();
        tokio::spawn(async move {
            match probe(&probe_pool).await {
                Ok(now) => tracing::info!(%target, "Successfully connected to PostgreSQL: {}", now),
                Err(e) => tracing::error!(%target, "Error connecting to PostgreSQL: {}", e),
            }
        });

        Arc::new(PgItemStore::new(pool))
    };

    // Run server (blocks until shutdown)
    run_server(AppState::new(store), args.listen.to_config())
        .await
        .context("Server error")?;

    Ok(())
}
