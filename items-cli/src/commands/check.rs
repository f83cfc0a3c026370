//! Database connectivity check

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use items_server::db::{create_pool, probe};

use crate::config::DbArgs;

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub db: DbArgs,

    /// Seconds to wait for the database before giving up
    #[arg(long, default_value_t = 5)]
    pub timeout: u64,
}

/// Run `SELECT NOW()` once and report the result
pub async fn run_check(args: CheckArgs) -> Result<()> {
    let db_config = args.db.to_config();
    let target = db_config.target();

    let pool = create_pool(&db_config).context("Invalid database configuration")?;

    let now = tokio::time::timeout(Duration::from_secs(args.timeout), probe(&pool))
        .await
        .map_err(|_| anyhow!("Timed out after {}s connecting to {}", args.timeout, target))?
        .with_context(|| format!("Failed to query {}", target))?;

    println!("Connected to {} (server time {})", target, now);
    pool.close().await;
    Ok(())
}
