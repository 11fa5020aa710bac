use serde::{Deserialize, Serialize};

use crate::models::catalog::TreatmentCatalogEntry;

/// Which of the profile's ids an entry matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchBreakdown {
    pub concern_ids: Vec<String>,
    pub goal_ids: Vec<String>,
    pub area_ids: Vec<String>,
}

impl MatchBreakdown {
    pub fn overlap_count(&self) -> usize {
        self.concern_ids.len() + self.goal_ids.len() + self.area_ids.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedTreatment {
    pub entry: TreatmentCatalogEntry,
    pub relevance_score: f64,
    pub session_count: u32,
    #[serde(rename = "subtotalKRW")]
    pub subtotal_krw: u64,
    pub match_breakdown: MatchBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    Safety,
    Budget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedTreatment {
    pub entry: TreatmentCatalogEntry,
    pub reason: ExclusionReason,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeSuggestion {
    pub entry: TreatmentCatalogEntry,
    #[serde(rename = "extraBudgetNeededKRW")]
    pub extra_budget_needed_krw: u64,
}

/// The engine's result. Built fresh per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationOutput {
    pub recommendations: Vec<SelectedTreatment>,
    #[serde(rename = "totalPriceKRW")]
    pub total_price_krw: u64,
    #[serde(rename = "totalPriceUSD")]
    pub total_price_usd: u64,
    pub excluded: Vec<ExcludedTreatment>,
    pub upgrade_suggestions: Vec<UpgradeSuggestion>,
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_upper_limit: Option<u64>,
}

impl RecommendationOutput {
    /// Zero recommendations is a normal outcome, not a failure.
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    pub fn total_relevance(&self) -> f64 {
        self.recommendations.iter().map(|r| r.relevance_score).sum()
    }
}
