use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skinplan_api::catalog::{CatalogSource, JsonCatalogSource, PgCatalogSource};
use skinplan_api::config::{CatalogBackend, Config, RateBackend};
use skinplan_api::db::create_pool;
use skinplan_api::models::reference::ReferenceData;
use skinplan_api::rates::{FixedRateSource, HttpRateSource, RateSource};
use skinplan_api::routes::build_router;
use skinplan_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first; a missing catalog backend aborts startup
    let config = Config::from_env()?;

    // Structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("skinplan_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkinPlan API v{}", env!("CARGO_PKG_VERSION"));

    // Reference enumerations
    let reference = match &config.reference_data_path {
        Some(path) => {
            info!("Loading reference data from {}", path.display());
            ReferenceData::load(path)?
        }
        None => ReferenceData::builtin()?,
    };

    // Treatment catalog
    let catalog: Arc<dyn CatalogSource> = match &config.catalog {
        CatalogBackend::Postgres { database_url } => {
            let db = create_pool(database_url).await?;
            sqlx::migrate!("./migrations").run(&db).await?;
            Arc::new(PgCatalogSource::new(db))
        }
        CatalogBackend::JsonFile { path } => {
            info!("Using catalog file {}", path.display());
            Arc::new(JsonCatalogSource::new(path.clone()))
        }
    };

    // Exchange rate
    let rates: Arc<dyn RateSource> = match &config.rates {
        RateBackend::Fixed { usd_per_krw } => {
            info!("Using fixed exchange rate: 1 KRW = {usd_per_krw} USD");
            Arc::new(FixedRateSource::new(*usd_per_krw))
        }
        RateBackend::Http { url, timeout_secs } => {
            info!("Fetching exchange rates from {url}");
            Arc::new(HttpRateSource::new(
                url.clone(),
                Duration::from_secs(*timeout_secs),
            )?)
        }
    };

    let state = AppState {
        config: config.clone(),
        reference: Arc::new(reference),
        catalog,
        rates,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the intake frontend has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
