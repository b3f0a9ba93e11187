//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use bbs_server::db::schema;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Create the tables and exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let gateway = super::connect(args.database_url).await?;

    let result = schema::ensure(&gateway)
        .await
        .context("Failed to prepare database schema");
    gateway.close().await;

    result
}
