//! Route Configuration
//!
//! Configures all HTTP routes for the API. Reads are public, writes require
//! a bearer token.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post, put},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, optional_auth_middleware, track_metrics};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/categories", category_routes(state.clone()))
        .nest("/servers", server_routes(state.clone()))
        .nest("/channels", channel_routes(state))
}

/// Category routes
fn category_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(handlers::category::list_categories))
        .route("/{category_id}", get(handlers::category::get_category));

    let protected = Router::new()
        .route("/", post(handlers::category::create_category))
        .route(
            "/{category_id}",
            patch(handlers::category::update_category)
                .delete(handlers::category::delete_category),
        )
        .route(
            "/{category_id}/icon",
            put(handlers::category::upload_icon).delete(handlers::category::delete_icon),
        )
        .route_layer(upload_limit(&state))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// Server routes, including the filtered listing
fn server_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(handlers::server::list_servers))
        .route("/{server_id}", get(handlers::server::get_server))
        .route(
            "/{server_id}/channels",
            get(handlers::channel::get_server_channels),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            optional_auth_middleware,
        ));

    let protected = Router::new()
        .route("/", post(handlers::server::create_server))
        .route(
            "/{server_id}",
            patch(handlers::server::update_server)
                .delete(handlers::server::delete_server),
        )
        .route(
            "/{server_id}/members/@me",
            put(handlers::server::join_server).delete(handlers::server::leave_server),
        )
        .route(
            "/{server_id}/channels",
            post(handlers::channel::create_channel),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// Channel routes
fn channel_routes(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/{channel_id}", get(handlers::channel::get_channel));

    let protected = Router::new()
        .route(
            "/{channel_id}",
            patch(handlers::channel::update_channel)
                .delete(handlers::channel::delete_channel),
        )
        .route(
            "/{channel_id}/icon",
            put(handlers::channel::upload_icon).delete(handlers::channel::delete_icon),
        )
        .route(
            "/{channel_id}/banner",
            put(handlers::channel::upload_banner).delete(handlers::channel::delete_banner),
        )
        .route_layer(upload_limit(&state))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

fn upload_limit(state: &AppState) -> DefaultBodyLimit {
    DefaultBodyLimit::max(state.settings.storage.max_upload_size)
}
