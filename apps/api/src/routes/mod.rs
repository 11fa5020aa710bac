pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommendation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Intake form enumerations and catalog
        .route("/api/v1/reference", get(handlers::handle_get_reference))
        .route("/api/v1/treatments", get(handlers::handle_list_treatments))
        // Recommendation engine
        .route(
            "/api/v1/recommendations",
            post(handlers::handle_recommend),
        )
        .with_state(state)
}
