//! lambda-echo - Main entry point
//!
//! Runs the echo handler behind one of three event sources:
//! - the AWS Lambda runtime API
//! - length-prefixed JSON over stdin/stdout
//! - a local HTTP server

mod config;
mod handler;
mod ipc;
mod lambda;
mod server;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, RunMode};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for IPC frames
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,lambda_echo=debug".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Starting lambda-echo in {} mode", config.mode);
    tracing::debug!("Configuration loaded: {:?}", config);

    match config.mode {
        RunMode::Lambda => lambda::run().await.map_err(|e| anyhow::anyhow!(e))?,
        RunMode::Ipc => tokio::task::spawn_blocking(ipc::run).await??,
        RunMode::Serve => server::serve(&config).await?,
    }

    Ok(())
}
