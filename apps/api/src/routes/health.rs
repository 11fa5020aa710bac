use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, backends and the active runtime config.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skinplan-api",
        "catalog": state.catalog.backend(),
        "rates": state.rates.backend(),
        "port": state.config.port,
        "logLevel": state.config.rust_log
    }))
}
