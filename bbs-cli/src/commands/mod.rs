//! Command implementations

pub mod migrate;
pub mod serve;

pub use migrate::run_migrate;
pub use serve::run_serve;

use anyhow::{Context, Result};
use bbs_server::{Gateway, PoolOptions};

/// Open the connection pool, failing with a hint when no URL was given.
async fn connect(database_url: Option<String>) -> Result<Gateway> {
    let database_url = database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    Gateway::connect(&database_url, PoolOptions::default())
        .await
        .context("Failed to create database pool")
}
