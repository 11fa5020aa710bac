use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub type ConcernId = String;
pub type GoalId = String;
pub type AreaId = String;
pub type MedicalConditionId = String;
pub type PastTreatmentId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentCategory {
    SkinCondition,
    AntiAging,
    Contouring,
    Other,
}

impl TreatmentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreatmentCategory::SkinCondition => "skin_condition",
            TreatmentCategory::AntiAging => "anti_aging",
            TreatmentCategory::Contouring => "contouring",
            TreatmentCategory::Other => "other",
        }
    }

    /// Unknown category strings fall back to `Other` rather than failing the catalog load.
    pub fn parse(value: &str) -> Self {
        match value {
            "skin_condition" => TreatmentCategory::SkinCondition,
            "anti_aging" => TreatmentCategory::AntiAging,
            "contouring" => TreatmentCategory::Contouring,
            _ => TreatmentCategory::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub ko: String,
    pub en: String,
}

fn default_sessions() -> u32 {
    1
}

fn default_tier() -> u8 {
    1
}

/// One treatment offered by the clinic. Read-only input to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentCatalogEntry {
    pub id: String,
    pub name: LocalizedName,
    /// Price of the full recommended course.
    #[serde(rename = "priceKRW")]
    pub price_krw: u64,
    pub category: TreatmentCategory,
    #[serde(default)]
    pub matched_concern_ids: BTreeSet<ConcernId>,
    #[serde(default)]
    pub matched_goal_ids: BTreeSet<GoalId>,
    #[serde(default)]
    pub matched_area_ids: BTreeSet<AreaId>,
    #[serde(default)]
    pub contraindications: BTreeSet<MedicalConditionId>,
    #[serde(default)]
    pub recency_blocked_by: BTreeSet<PastTreatmentId>,
    /// Invasiveness / downtime rank, 1 = least invasive.
    #[serde(default = "default_tier")]
    pub tier: u8,
    #[serde(default = "default_sessions")]
    pub recommended_sessions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_rating: Option<f64>,
}

impl TreatmentCatalogEntry {
    pub fn effective_tier(&self) -> u8 {
        self.tier.max(1)
    }
}

/// Row shape of the `treatments` table.
#[derive(Debug, Clone, FromRow)]
pub struct TreatmentRow {
    pub id: String,
    pub name_ko: String,
    pub name_en: String,
    pub price_krw: i64,
    pub category: String,
    pub matched_concern_ids: Vec<String>,
    pub matched_goal_ids: Vec<String>,
    pub matched_area_ids: Vec<String>,
    pub contraindications: Vec<String>,
    pub recency_blocked_by: Vec<String>,
    pub tier: i16,
    pub recommended_sessions: i32,
    pub review_rating: Option<f64>,
    pub position: i32,
}

impl From<TreatmentRow> for TreatmentCatalogEntry {
    fn from(row: TreatmentRow) -> Self {
        TreatmentCatalogEntry {
            id: row.id,
            name: LocalizedName {
                ko: row.name_ko,
                en: row.name_en,
            },
            price_krw: row.price_krw.max(0) as u64,
            category: TreatmentCategory::parse(&row.category),
            matched_concern_ids: row.matched_concern_ids.into_iter().collect(),
            matched_goal_ids: row.matched_goal_ids.into_iter().collect(),
            matched_area_ids: row.matched_area_ids.into_iter().collect(),
            contraindications: row.contraindications.into_iter().collect(),
            recency_blocked_by: row.recency_blocked_by.into_iter().collect(),
            tier: row.tier.clamp(1, u8::MAX as i16) as u8,
            recommended_sessions: row.recommended_sessions.max(1) as u32,
            review_rating: row.review_rating,
        }
    }
}
