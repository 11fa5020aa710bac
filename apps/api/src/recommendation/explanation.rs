//! Explanation Generator: says why each relevant entry was left out, what extra budget
//! would unlock it, and which note templates apply to this result.

use crate::models::output::{ExcludedTreatment, ExclusionReason, UpgradeSuggestion};
use crate::models::profile::PatientProfile;
use crate::recommendation::safety::SafetyExclusion;
use crate::recommendation::scoring::compute_match_breakdown;
use crate::recommendation::selector::BudgetSelection;
use crate::recommendation::templates::{
    BUDGET_EXCLUSION_DETAIL_TEMPLATE, NOTE_BUDGET_REACHED, NOTE_FLEXIBLE_BUDGET,
    NOTE_NOTHING_FITS_BUDGET, NOTE_NO_MATCH, NOTE_OTHER_CONCERN_GENERIC,
    NOTE_OTHER_CONCERN_TEMPLATE, NOTE_RECENCY_DEFERRALS, NOTE_SAFETY_EXCLUSIONS,
};

/// Situations that map one-to-one onto note templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteSituation {
    NoMatch,
    SafetyExclusions,
    RecencyDeferrals,
    NothingFitsBudget,
    BudgetReached,
    FlexibleBudget,
    OtherConcern { detail: String },
}

impl NoteSituation {
    pub fn render(&self) -> String {
        match self {
            NoteSituation::NoMatch => NOTE_NO_MATCH.to_string(),
            NoteSituation::SafetyExclusions => NOTE_SAFETY_EXCLUSIONS.to_string(),
            NoteSituation::RecencyDeferrals => NOTE_RECENCY_DEFERRALS.to_string(),
            NoteSituation::NothingFitsBudget => NOTE_NOTHING_FITS_BUDGET.to_string(),
            NoteSituation::BudgetReached => NOTE_BUDGET_REACHED.to_string(),
            NoteSituation::FlexibleBudget => NOTE_FLEXIBLE_BUDGET.to_string(),
            NoteSituation::OtherConcern { detail } if detail.is_empty() => {
                NOTE_OTHER_CONCERN_GENERIC.to_string()
            }
            NoteSituation::OtherConcern { detail } => {
                NOTE_OTHER_CONCERN_TEMPLATE.replace("{detail}", detail)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Explanation {
    pub excluded: Vec<ExcludedTreatment>,
    pub upgrade_suggestions: Vec<UpgradeSuggestion>,
    pub situations: Vec<NoteSituation>,
}

/// Only exclusions that overlap the profile are worth explaining.
pub fn relevant_safety_exclusions<'s, 'a>(
    exclusions: &'s [SafetyExclusion<'a>],
    profile: &PatientProfile,
) -> Vec<&'s SafetyExclusion<'a>> {
    exclusions
        .iter()
        .filter(|ex| compute_match_breakdown(ex.entry, profile).overlap_count() > 0)
        .collect()
}

/// Extra KRW needed to add `price` on top of the current selection.
pub fn extra_budget_needed(price: u64, selected_total: u64, upper_limit: u64) -> u64 {
    let remaining = upper_limit.saturating_sub(selected_total);
    price.saturating_sub(remaining)
}

pub fn explain(
    profile: &PatientProfile,
    safety_exclusions: &[&SafetyExclusion<'_>],
    selection: &BudgetSelection<'_>,
) -> Explanation {
    let mut explanation = Explanation::default();

    for exclusion in safety_exclusions {
        explanation.excluded.push(ExcludedTreatment {
            entry: exclusion.entry.clone(),
            reason: ExclusionReason::Safety,
            detail: exclusion.detail(),
        });
    }

    if let Some(upper_limit) = profile.budget_upper_limit {
        let remaining = upper_limit.saturating_sub(selection.total_price_krw);
        for candidate in &selection.rejected {
            let extra =
                extra_budget_needed(candidate.entry.price_krw, selection.total_price_krw, upper_limit);
            explanation.excluded.push(ExcludedTreatment {
                entry: candidate.entry.clone(),
                reason: ExclusionReason::Budget,
                detail: BUDGET_EXCLUSION_DETAIL_TEMPLATE
                    .replace("{extra}", &extra.to_string())
                    .replace("{remaining}", &remaining.to_string()),
            });
            explanation.upgrade_suggestions.push(UpgradeSuggestion {
                entry: candidate.entry.clone(),
                extra_budget_needed_krw: extra,
            });
        }
        // Stable sort keeps catalog order between equal amounts.
        explanation
            .upgrade_suggestions
            .sort_by_key(|s| s.extra_budget_needed_krw);
    }

    explanation.situations = detect_situations(profile, safety_exclusions, selection);
    explanation
}

fn detect_situations(
    profile: &PatientProfile,
    safety_exclusions: &[&SafetyExclusion<'_>],
    selection: &BudgetSelection<'_>,
) -> Vec<NoteSituation> {
    let mut situations = Vec::new();
    let nothing_selected = selection.selected.is_empty();

    if safety_exclusions.is_empty() && nothing_selected && selection.rejected.is_empty() {
        situations.push(NoteSituation::NoMatch);
    }
    if safety_exclusions.iter().any(|ex| !ex.is_recency_only()) {
        situations.push(NoteSituation::SafetyExclusions);
    }
    if safety_exclusions.iter().any(|ex| ex.is_recency_only()) {
        situations.push(NoteSituation::RecencyDeferrals);
    }
    if !selection.rejected.is_empty() {
        if nothing_selected {
            situations.push(NoteSituation::NothingFitsBudget);
        } else {
            situations.push(NoteSituation::BudgetReached);
        }
    }
    if profile.is_flexible_budget() && !nothing_selected {
        situations.push(NoteSituation::FlexibleBudget);
    }
    if let Some(detail) = profile.other_concern_detail() {
        situations.push(NoteSituation::OtherConcern {
            detail: detail.to_string(),
        });
    }

    situations
}
