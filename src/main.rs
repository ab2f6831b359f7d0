//! # Chat Community
//!
//! Application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool and migrations
//! - File storage
//! - HTTP server

use anyhow::Result;
use tracing::info;

use chat_community::config::Settings;
use chat_community::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    chat_community::telemetry::init_tracing();

    info!("Starting Chat Community...");

    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
