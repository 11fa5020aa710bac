//! Axum route handlers for the Recommendation API.

use std::sync::Arc;

use anyhow::Context;
use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::models::catalog::TreatmentCatalogEntry;
use crate::models::output::RecommendationOutput;
use crate::models::profile::RawIntakeInput;
use crate::models::reference::ReferenceData;
use crate::recommendation::engine::{recommend_treatments, RecommendationRequest};
use crate::recommendation::error::RecommendationError;
use crate::state::AppState;

/// POST /api/v1/recommendations
///
/// Loads the catalog and a fresh exchange rate, then runs the engine on a blocking
/// worker. The engine is CPU-bound (knapsack DP) and must not stall the runtime.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(intake): Json<RawIntakeInput>,
) -> Result<Json<RecommendationOutput>, AppError> {
    let catalog = state.catalog.load().await?;
    if catalog.is_empty() {
        return Err(RecommendationError::EmptyCatalog.into());
    }
    let exchange_rate = state.rates.usd_per_krw().await?;
    let reference = Arc::clone(&state.reference);

    info!(
        "Running recommendation over {} treatments ({} catalog, {} rates)",
        catalog.len(),
        state.catalog.backend(),
        state.rates.backend()
    );

    let output = tokio::task::spawn_blocking(move || {
        recommend_treatments(&RecommendationRequest {
            intake: &intake,
            catalog: &catalog,
            exchange_rate,
            reference: &reference,
        })
    })
    .await
    .context("recommendation worker failed")??;

    Ok(Json(output))
}

/// GET /api/v1/reference
pub async fn handle_get_reference(State(state): State<AppState>) -> Json<ReferenceData> {
    Json(state.reference.as_ref().clone())
}

/// GET /api/v1/treatments
pub async fn handle_list_treatments(
    State(state): State<AppState>,
) -> Result<Json<Vec<TreatmentCatalogEntry>>, AppError> {
    Ok(Json(state.catalog.load().await?))
}
