use std::sync::Arc;

use crate::catalog::CatalogSource;
use crate::config::Config;
use crate::models::reference::ReferenceData;
use crate::rates::RateSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Reference enumerations used to validate intake ids. Loaded once at startup.
    pub reference: Arc<ReferenceData>,
    /// Pluggable catalog backend. Postgres when DATABASE_URL is set, JSON file otherwise.
    pub catalog: Arc<dyn CatalogSource>,
    /// Pluggable exchange-rate backend. Queried once per recommendation.
    pub rates: Arc<dyn RateSource>,
}
