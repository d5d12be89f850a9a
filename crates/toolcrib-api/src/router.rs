//! Route definitions for the Toolcrib HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::{get, post};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with every route and the request logger.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .merge(tool_type_routes())
        .merge(tool_routes())
        .merge(checkout_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// User CRUD
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
}

/// Tool type CRUD
fn tool_type_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tool-types",
            get(handlers::tool_type::list_tool_types).post(handlers::tool_type::create_tool_type),
        )
        .route(
            "/tool-types/{id}",
            get(handlers::tool_type::get_tool_type)
                .put(handlers::tool_type::update_tool_type)
                .delete(handlers::tool_type::delete_tool_type),
        )
}

/// Tool registry, lookup, calibration and history
fn tool_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tools",
            get(handlers::tool::list_tools).post(handlers::tool::create_tool),
        )
        .route("/tools/available", get(handlers::tool::list_available_tools))
        .route("/tools/serial/{serial}", get(handlers::tool::get_tool_by_serial))
        .route(
            "/tools/{id}",
            get(handlers::tool::get_tool)
                .put(handlers::tool::update_tool)
                .delete(handlers::tool::delete_tool),
        )
        .route("/tools/{id}/calibrate", post(handlers::tool::calibrate_tool))
        .route("/tools/{id}/checkouts", get(handlers::tool::tool_history))
}

/// Checkout lifecycle
fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/checkouts",
            get(handlers::checkout::list_open_checkouts).post(handlers::checkout::checkout_tool),
        )
        .route("/checkouts/return", post(handlers::checkout::return_tool))
        .route("/checkouts/{id}", get(handlers::checkout::get_checkout))
}
