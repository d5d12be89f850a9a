//! Application builder: wires router, middleware and state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use toolcrib_core::config::AppConfig;
use toolcrib_core::error::AppError;
use toolcrib_core::result::AppResult;
use toolcrib_database::store::InventoryStore;
use toolcrib_service::Seeder;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the Toolcrib server over an opened store until Ctrl+C.
pub async fn run_server(config: AppConfig, store: Arc<dyn InventoryStore>) -> AppResult<()> {
    info!(store = store.backend_name(), "Starting Toolcrib server...");

    if config.inventory.seed_on_startup {
        let summary = Seeder::new(Arc::clone(&store)).seed_if_empty().await?;
        if !summary.is_empty() {
            info!(
                tool_types = summary.tool_types,
                users = summary.users,
                tools = summary.tools,
                "Demo inventory installed"
            );
        }
    }

    let addr = config.server.bind_address();
    let app = build_app(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(address = %addr, "Toolcrib server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Toolcrib server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
