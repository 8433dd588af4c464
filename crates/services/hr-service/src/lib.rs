//! HR Service Library
//!
//! HTTP API for account administration, departments, employees and image
//! uploads, backed by PostgreSQL and S3-compatible object storage.

pub mod api;
pub mod config;
pub mod credentials;
pub mod dto;
pub mod infra;
pub mod repository;
pub mod seed;
pub mod service;

use std::fs::File;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, cors::CorsLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::HrServiceConfig;
use crate::infra::{Database, S3Storage};

/// Run the HTTP server, optionally overriding the configured address.
pub async fn run_server(
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = HrServiceConfig::from_env()?;
    if let Some(host) = host {
        config.service.host = host;
    }
    if let Some(port) = port {
        config.service.port = port;
    }

    run_server_with_config(config).await
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(config: HrServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&config.database).await?;

    // Object storage
    let storage = Arc::new(S3Storage::new(&config.storage));

    let addr: SocketAddr = config.server_addr().parse()?;
    let state = AppState::new(db, storage, config);

    // Build router
    let app = create_router(state)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http());

    info!("HR service listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = HrServiceConfig::from_env()?;
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Import accounts from a header-less `name,email,password,role_id` CSV file.
pub async fn run_seed(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let rows = seed::parse_accounts(File::open(path)?)?;

    let config = HrServiceConfig::from_env()?;
    let db = Database::connect(&config.database).await?;
    let storage = Arc::new(S3Storage::new(&config.storage));
    let state = AppState::new(db, storage, config);

    let created = seed::seed_accounts(state.accounts.as_ref(), rows).await?;
    info!(created, path = %path.display(), "Seeding finished");

    Ok(())
}
