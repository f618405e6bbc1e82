//! Router configuration for the web server.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::middleware::global_gate;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/tournaments",
            get(handlers::search_tournaments).post(handlers::create_tournament),
        )
        .route("/api/scrape", post(handlers::trigger_scrape))
        .route("/api/health", get(handlers::health))
        .layer(from_fn_with_state(state.clone(), global_gate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
