//! Catalog sources: where the treatment catalog comes from.
//!
//! `AppState` holds an `Arc<dyn CatalogSource>`, chosen at startup from config.
//! Every source returns entries in a stable order; that order is the engine's final
//! tie-breaker, so sources must never shuffle it.

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::errors::AppError;
use crate::models::catalog::{TreatmentCatalogEntry, TreatmentRow};

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Loads the full active catalog in its canonical order.
    async fn load(&self) -> Result<Vec<TreatmentCatalogEntry>, AppError>;

    /// Short label for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// PgCatalogSource
// ────────────────────────────────────────────────────────────────────────────

/// Reads the `treatments` table on every call.
pub struct PgCatalogSource {
    db: PgPool,
}

impl PgCatalogSource {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogSource for PgCatalogSource {
    async fn load(&self) -> Result<Vec<TreatmentCatalogEntry>, AppError> {
        let rows = sqlx::query_as::<_, TreatmentRow>(
            r#"
            SELECT id, name_ko, name_en, price_krw, category,
                   matched_concern_ids, matched_goal_ids, matched_area_ids,
                   contraindications, recency_blocked_by,
                   tier, recommended_sessions, review_rating, position
            FROM treatments
            WHERE active
            ORDER BY position ASC, id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        debug!("Loaded {} treatments from Postgres", rows.len());
        Ok(rows.into_iter().map(TreatmentCatalogEntry::from).collect())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// JsonCatalogSource
// ────────────────────────────────────────────────────────────────────────────

/// Reads a JSON array of catalog entries from disk. The file is re-read on each
/// call so edits show up without a restart.
pub struct JsonCatalogSource {
    path: PathBuf,
}

impl JsonCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for JsonCatalogSource {
    async fn load(&self) -> Result<Vec<TreatmentCatalogEntry>, AppError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read catalog file {}", self.path.display()))?;
        let entries: Vec<TreatmentCatalogEntry> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid catalog JSON in {}", self.path.display()))?;

        debug!(
            "Loaded {} treatments from {}",
            entries.len(),
            self.path.display()
        );
        Ok(entries)
    }

    fn backend(&self) -> &'static str {
        "json-file"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// StaticCatalogSource
// ────────────────────────────────────────────────────────────────────────────

/// In-memory catalog. Used by router tests and for seeding a fixed list.
pub struct StaticCatalogSource {
    entries: Vec<TreatmentCatalogEntry>,
}

impl StaticCatalogSource {
    pub fn new(entries: Vec<TreatmentCatalogEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn load(&self) -> Result<Vec<TreatmentCatalogEntry>, AppError> {
        Ok(self.entries.clone())
    }

    fn backend(&self) -> &'static str {
        "static"
    }
}
