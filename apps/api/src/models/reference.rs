use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const BUILTIN_REFERENCE_JSON: &str = include_str!("../../data/reference.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRange {
    pub id: String,
    pub label: String,
    /// `None` = no ceiling.
    #[serde(rename = "upperLimitKRW")]
    pub upper_limit_krw: Option<u64>,
}

/// Which enumeration an id belongs to. Used for lookups and validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    SkinType,
    Concern,
    Goal,
    Area,
    BudgetRange,
    Priority,
    PastTreatment,
    MedicalCondition,
    Ethnicity,
}

impl ReferenceKind {
    pub fn field_name(&self) -> &'static str {
        match self {
            ReferenceKind::SkinType => "skinTypeId",
            ReferenceKind::Concern => "concerns",
            ReferenceKind::Goal => "goalIds",
            ReferenceKind::Area => "areaIds",
            ReferenceKind::BudgetRange => "budgetRangeId",
            ReferenceKind::Priority => "priorityId",
            ReferenceKind::PastTreatment => "pastTreatmentIds",
            ReferenceKind::MedicalCondition => "medicalConditionIds",
            ReferenceKind::Ethnicity => "ethnicityId",
        }
    }
}

/// Reference enumerations owned by external configuration and injected into the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub skin_types: Vec<ReferenceItem>,
    pub concerns: Vec<ReferenceItem>,
    pub goals: Vec<ReferenceItem>,
    pub areas: Vec<ReferenceItem>,
    pub budget_ranges: Vec<BudgetRange>,
    pub priorities: Vec<ReferenceItem>,
    pub past_treatments: Vec<ReferenceItem>,
    pub medical_conditions: Vec<ReferenceItem>,
    #[serde(default)]
    pub ethnicities: Vec<ReferenceItem>,
    /// Keyed by ethnicity id or skin type id.
    #[serde(default)]
    pub ethnicity_notes: BTreeMap<String, String>,
}

impl ReferenceData {
    /// The table shipped with the service.
    pub fn builtin() -> Result<Self> {
        serde_json::from_str(BUILTIN_REFERENCE_JSON).context("built-in reference data is malformed")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference data from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Reference data at {} is not valid JSON", path.display()))
    }

    pub fn contains(&self, kind: ReferenceKind, id: &str) -> bool {
        let items = match kind {
            ReferenceKind::SkinType => &self.skin_types,
            ReferenceKind::Concern => &self.concerns,
            ReferenceKind::Goal => &self.goals,
            ReferenceKind::Area => &self.areas,
            ReferenceKind::BudgetRange => {
                return self.budget_ranges.iter().any(|b| b.id == id);
            }
            ReferenceKind::Priority => &self.priorities,
            ReferenceKind::PastTreatment => &self.past_treatments,
            ReferenceKind::MedicalCondition => &self.medical_conditions,
            ReferenceKind::Ethnicity => &self.ethnicities,
        };
        items.iter().any(|item| item.id == id)
    }

    pub fn budget_range(&self, id: &str) -> Option<&BudgetRange> {
        self.budget_ranges.iter().find(|b| b.id == id)
    }

    /// Ethnicity id wins over skin type id; no match is not an error.
    pub fn ethnicity_note(&self, ethnicity_id: Option<&str>, skin_type_id: &str) -> Option<&str> {
        ethnicity_id
            .and_then(|id| self.ethnicity_notes.get(id))
            .or_else(|| self.ethnicity_notes.get(skin_type_id))
            .map(String::as_str)
    }
}
