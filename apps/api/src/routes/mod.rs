pub mod handlers;
pub mod health;
pub mod pagination;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/recommendations",
            get(handlers::handle_get_recommendations),
        )
        .route("/api/v1/search", get(handlers::handle_search))
        .route("/api/v1/stats", get(handlers::handle_get_stats))
        .route("/api/v1/cache", delete(handlers::handle_clear_cache))
        .with_state(state)
}
