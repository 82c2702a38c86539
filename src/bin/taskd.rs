//! Runs the task REST service.
//!
//! Usage:
//!
//! ```text
//! taskd --config <path>
//! ```
//!
//! A `.env` file in the working directory is loaded before the configuration
//! so that `TASKD_DATABASE_URL`, `TASKD_PORT` and `TASKD_LOG` can be kept out
//! of the YAML document.

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use mockable::DefaultClock;
use std::path::PathBuf;
use std::sync::Arc;
use taskd::{
    config::AppConfig,
    http,
    task::{
        adapters::postgres::{PostgresTaskStore, TaskPgPool, apply_schema, build_pool},
        services::TaskService,
    },
    telemetry,
};

#[derive(Debug, Parser)]
#[command(name = "taskd", version, about = "Multi-tenant task REST service")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = "taskd.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::from_file(&cli.config)?;
    config.apply_env_overrides()?;
    telemetry::init(&config.log)?;

    let pool = build_pool(&config.pool_settings());
    if config.database.apply_migrations {
        migrate(pool.clone()).await?;
    }

    let service = TaskService::new(
        Arc::new(PostgresTaskStore::new(pool.clone())),
        Arc::new(DefaultClock),
    );
    let address = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("cannot bind {address}"))?;
    tracing::info!(%address, "taskd listening");

    axum::serve(listener, http::router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated abnormally")?;

    drop(pool);
    tracing::info!("taskd stopped");
    Ok(())
}

async fn migrate(pool: TaskPgPool) -> anyhow::Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().context("cannot check out a connection")?;
        apply_schema(&mut connection).context("cannot apply task schema")
    })
    .await
    .context("migration task failed")??;
    tracing::info!("task schema is up to date");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot listen for shutdown signal");
    }
    tracing::info!("shutdown requested");
}
