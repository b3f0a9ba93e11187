//! HTTP server command for the bbs API

use anyhow::{Context, Result};
use clap::Parser;

use bbs_server::db::schema;
use bbs_server::http::{run_server, ServerConfig, DEFAULT_PORT};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on (all interfaces)
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let gateway = super::connect(args.database_url).await?;

    schema::ensure(&gateway)
        .await
        .context("Failed to prepare database schema")?;

    tracing::info!("Starting bbs server on port {}", args.port);

    // Run server (blocks until shutdown, then drains the pool)
    run_server(gateway, ServerConfig::with_port(args.port))
        .await
        .context("Server error")?;

    Ok(())
}
