use serde::{Deserialize, Serialize};

use crate::models::catalog::{AreaId, ConcernId, GoalId, MedicalConditionId, PastTreatmentId};

/// The concern id whose sub-options carry free text instead of catalog ids.
pub const OTHER_CONCERN_ID: &str = "other";
/// Medical-condition / past-treatment sentinel meaning "nothing applies".
pub const NONE_ID: &str = "none";
/// Past-treatment sentinel meaning "never had any treatment".
pub const NEVER_ID: &str = "never";
pub const FLEXIBLE_BUDGET_ID: &str = "flexible";

/// A concern as submitted by the intake form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConcern {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_options: Option<Vec<String>>,
}

/// Intake answers exactly as the form hands them over; every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIntakeInput {
    #[serde(default)]
    pub skin_type_id: Option<String>,
    #[serde(default)]
    pub concerns: Option<Vec<RawConcern>>,
    #[serde(default)]
    pub goal_ids: Option<Vec<String>>,
    #[serde(default)]
    pub area_ids: Option<Vec<String>>,
    #[serde(default)]
    pub budget_range_id: Option<String>,
    #[serde(default)]
    pub priority_id: Option<String>,
    #[serde(default)]
    pub past_treatment_ids: Option<Vec<String>>,
    #[serde(default)]
    pub medical_condition_ids: Option<Vec<String>>,
    #[serde(default)]
    pub ethnicity_id: Option<String>,
}

/// A normalized concern. Only `Standard` concerns can match catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Concern {
    Standard { id: ConcernId },
    Other { detail: String },
}

impl Concern {
    pub fn standard_id(&self) -> Option<&str> {
        match self {
            Concern::Standard { id } => Some(id.as_str()),
            Concern::Other { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Effectiveness,
    Price,
    MinimalDowntime,
    Safety,
    Reviews,
}

impl Priority {
    pub const ALL: [Priority; 5] = [
        Priority::Effectiveness,
        Priority::Price,
        Priority::MinimalDowntime,
        Priority::Safety,
        Priority::Reviews,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Effectiveness => "effectiveness",
            Priority::Price => "price",
            Priority::MinimalDowntime => "minimal_downtime",
            Priority::Safety => "safety",
            Priority::Reviews => "reviews",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Priority::ALL.into_iter().find(|p| p.as_str() == id)
    }
}

/// Canonical profile built once per request by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub skin_type_id: String,
    pub concerns: Vec<Concern>,
    pub goal_ids: Vec<GoalId>,
    pub area_ids: Vec<AreaId>,
    pub budget_range_id: String,
    /// `None` means no ceiling ("flexible").
    pub budget_upper_limit: Option<u64>,
    pub priority: Priority,
    pub past_treatment_ids: Vec<PastTreatmentId>,
    pub medical_condition_ids: Vec<MedicalConditionId>,
    pub ethnicity_id: Option<String>,
}

impl PatientProfile {
    pub fn standard_concern_ids(&self) -> impl Iterator<Item = &str> {
        self.concerns.iter().filter_map(Concern::standard_id)
    }

    pub fn other_concern_detail(&self) -> Option<&str> {
        self.concerns.iter().find_map(|c| match c {
            Concern::Other { detail } => Some(detail.as_str()),
            Concern::Standard { .. } => None,
        })
    }

    /// True when prior treatments cannot block anything.
    pub fn has_no_prior_treatments(&self) -> bool {
        self.past_treatment_ids
            .iter()
            .all(|id| id == NONE_ID || id == NEVER_ID)
    }

    pub fn is_flexible_budget(&self) -> bool {
        self.budget_upper_limit.is_none()
    }
}
