//! User Service Library
//!
//! CRUD HTTP API for user records, layered as handlers -> service ->
//! repository over a SeaORM connection.

pub mod config;
pub mod handlers;
pub mod infra;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::routes::create_router;
use crate::service::UserManager;
use crate::state::AppState;

/// Wire the repository, service and router on top of an open database.
pub fn build_app(database: Database, config: UserServiceConfig) -> axum::Router {
    let user_repo = Arc::new(UserStore::new(database.get_connection()));
    let user_service = Arc::new(UserManager::new(user_repo));

    create_router(AppState::new(user_service, database, config))
}

/// Run the HTTP server until Ctrl+C.
pub async fn run_server(config: UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let database = Database::connect(&config.database).await?;

    let addr: SocketAddr = format!("{}:{}", config.service.host, config.service.port).parse()?;
    let service_name = config.service.service_name.clone();
    let app = build_app(database, config);

    info!("{} listening on {}", service_name, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("{} stopped", service_name);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Received shutdown signal, draining connections...");
}
