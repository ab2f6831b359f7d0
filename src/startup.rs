//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use once_cell::sync::Lazy;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::application::services::AssetService;
use crate::config::Settings;
use crate::domain::FileStorage;
use crate::infrastructure::{database, metrics, storage};
use crate::presentation::http::{create_router, handlers::health};
use crate::presentation::middleware::create_cors_layer;
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub storage: Arc<dyn FileStorage>,
    pub assets: Arc<AssetService>,
    pub snowflake: Arc<SnowflakeGenerator>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Assemble state from an existing pool and storage backend.
    pub fn new(db: PgPool, storage: Arc<dyn FileStorage>, settings: Settings) -> Self {
        let assets = Arc::new(AssetService::new(
            storage.clone(),
            settings.storage.max_icon_size,
        ));
        let snowflake = Arc::new(SnowflakeGenerator::new(
            settings.snowflake.epoch,
            settings.snowflake.machine_id,
        ));

        Self {
            db,
            storage,
            assets,
            snowflake,
            settings: Arc::new(settings),
        }
    }
}

/// Router with every layer the server runs with.
pub fn build_router(state: AppState) -> Router {
    let cors = create_cors_layer(&state.settings.cors);

    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let db = database::create_pool(&settings.database)
            .await
            .context("Failed to connect to the database")?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        let storage = storage::create_storage(&settings.storage);
        tracing::info!(
            backend = ?settings.storage.backend,
            media_url = %settings.storage.media_url,
            "File storage ready"
        );

        Lazy::force(&metrics::REGISTRY);
        health::init_server_start();

        let listener = TcpListener::bind(settings.server_addr())
            .await
            .with_context(|| format!("Failed to bind {}", settings.server_addr()))?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        let state = AppState::new(db, storage, settings);
        let router = build_router(state);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
