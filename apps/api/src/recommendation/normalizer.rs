//! Profile Normalizer: turns raw intake answers into a canonical `PatientProfile`.
//!
//! Missing fields take fixed defaults. Unknown ids are rejected, never dropped.

use crate::models::profile::{
    Concern, PatientProfile, Priority, RawConcern, RawIntakeInput, FLEXIBLE_BUDGET_ID, NEVER_ID,
    NONE_ID, OTHER_CONCERN_ID,
};
use crate::models::reference::{ReferenceData, ReferenceKind};
use crate::recommendation::error::RecommendationError;

const DEFAULT_SKIN_TYPE: &str = "combination";
const DEFAULT_PRIORITY: &str = "effectiveness";

pub fn normalize_profile(
    raw: &RawIntakeInput,
    reference: &ReferenceData,
) -> Result<PatientProfile, RecommendationError> {
    let skin_type_id = raw
        .skin_type_id
        .clone()
        .unwrap_or_else(|| DEFAULT_SKIN_TYPE.to_string());
    require_known(reference, ReferenceKind::SkinType, &skin_type_id)?;

    let concerns = normalize_concerns(raw.concerns.as_deref().unwrap_or_default(), reference)?;
    let goal_ids = normalize_ids(raw.goal_ids.as_deref(), ReferenceKind::Goal, reference)?;
    let area_ids = normalize_ids(raw.area_ids.as_deref(), ReferenceKind::Area, reference)?;

    let budget_range_id = raw
        .budget_range_id
        .clone()
        .unwrap_or_else(|| FLEXIBLE_BUDGET_ID.to_string());
    let budget_upper_limit = reference
        .budget_range(&budget_range_id)
        .ok_or_else(|| unknown_id(ReferenceKind::BudgetRange, &budget_range_id))?
        .upper_limit_krw;

    let priority_id = raw.priority_id.as_deref().unwrap_or(DEFAULT_PRIORITY);
    require_known(reference, ReferenceKind::Priority, priority_id)?;
    let priority = Priority::from_id(priority_id).ok_or_else(|| {
        RecommendationError::validation(
            ReferenceKind::Priority.field_name(),
            format!("priority '{priority_id}' has no scoring weights"),
        )
    })?;

    let past_treatment_ids = match raw.past_treatment_ids.as_deref() {
        Some(ids) if !ids.is_empty() => {
            normalize_ids(Some(ids), ReferenceKind::PastTreatment, reference)?
        }
        _ => vec![NONE_ID.to_string()],
    };
    require_exclusive(&past_treatment_ids, &[NONE_ID, NEVER_ID], ReferenceKind::PastTreatment)?;

    let medical_condition_ids = match raw.medical_condition_ids.as_deref() {
        Some(ids) if !ids.is_empty() => {
            normalize_ids(Some(ids), ReferenceKind::MedicalCondition, reference)?
        }
        _ => vec![NONE_ID.to_string()],
    };
    require_exclusive(&medical_condition_ids, &[NONE_ID], ReferenceKind::MedicalCondition)?;

    let ethnicity_id = match raw.ethnicity_id.as_deref() {
        Some(id) => {
            require_known(reference, ReferenceKind::Ethnicity, id)?;
            Some(id.to_string())
        }
        None => None,
    };

    Ok(PatientProfile {
        skin_type_id,
        concerns,
        goal_ids,
        area_ids,
        budget_range_id,
        budget_upper_limit,
        priority,
        past_treatment_ids,
        medical_condition_ids,
        ethnicity_id,
    })
}

fn normalize_concerns(
    raw: &[RawConcern],
    reference: &ReferenceData,
) -> Result<Vec<Concern>, RecommendationError> {
    let mut concerns: Vec<Concern> = Vec::with_capacity(raw.len());
    for concern in raw {
        require_known(reference, ReferenceKind::Concern, &concern.id)?;
        let normalized = if concern.id == OTHER_CONCERN_ID {
            let detail = concern
                .sub_options
                .iter()
                .flatten()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            Concern::Other { detail }
        } else {
            Concern::Standard {
                id: concern.id.clone(),
            }
        };
        if !concerns.contains(&normalized) {
            concerns.push(normalized);
        }
    }
    Ok(concerns)
}

/// Validates every id and collapses duplicates, keeping first-seen order.
fn normalize_ids(
    ids: Option<&[String]>,
    kind: ReferenceKind,
    reference: &ReferenceData,
) -> Result<Vec<String>, RecommendationError> {
    let mut out: Vec<String> = Vec::new();
    for id in ids.unwrap_or_default() {
        require_known(reference, kind, id)?;
        if !out.contains(id) {
            out.push(id.clone());
        }
    }
    Ok(out)
}

fn require_known(
    reference: &ReferenceData,
    kind: ReferenceKind,
    id: &str,
) -> Result<(), RecommendationError> {
    if reference.contains(kind, id) {
        Ok(())
    } else {
        Err(unknown_id(kind, id))
    }
}

fn unknown_id(kind: ReferenceKind, id: &str) -> RecommendationError {
    RecommendationError::validation(kind.field_name(), format!("unknown id '{id}'"))
}

/// A sentinel such as "none" cannot be combined with any other id.
fn require_exclusive(
    ids: &[String],
    sentinels: &[&str],
    kind: ReferenceKind,
) -> Result<(), RecommendationError> {
    if ids.len() < 2 {
        return Ok(());
    }
    match ids.iter().find(|id| sentinels.contains(&id.as_str())) {
        Some(sentinel) => Err(RecommendationError::validation(
            kind.field_name(),
            format!("'{sentinel}' cannot be combined with other ids"),
        )),
        None => Ok(()),
    }
}
