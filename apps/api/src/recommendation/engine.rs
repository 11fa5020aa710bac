//! Recommendation engine: one synchronous pass from raw intake to `RecommendationOutput`.
//!
//! Flow: normalize → safety filter → score → budget select → convert currency →
//!       explain → assemble.
//!
//! Pure: no I/O, no shared state, no clock. Budget ceilings, reference ids and the
//! exchange rate are all supplied by the caller.

use tracing::{debug, info};

use crate::models::catalog::TreatmentCatalogEntry;
use crate::models::output::{RecommendationOutput, SelectedTreatment};
use crate::models::profile::RawIntakeInput;
use crate::models::reference::ReferenceData;
use crate::recommendation::currency::{krw_to_usd, validate_exchange_rate};
use crate::recommendation::error::RecommendationError;
use crate::recommendation::explanation::{explain, relevant_safety_exclusions};
use crate::recommendation::normalizer::normalize_profile;
use crate::recommendation::safety::apply_safety_filter;
use crate::recommendation::scoring::score_candidates;
use crate::recommendation::selector::select_within_budget;

/// Everything one call needs. Nothing is read from globals.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationRequest<'a> {
    pub intake: &'a RawIntakeInput,
    /// Read-only; insertion order is the final tie-breaker.
    pub catalog: &'a [TreatmentCatalogEntry],
    /// USD per KRW.
    pub exchange_rate: f64,
    pub reference: &'a ReferenceData,
}

/// Runs the full pipeline. Returns a complete output or an error, never a partial result.
///
/// An empty `recommendations` list is a valid outcome and is explained through `notes`.
pub fn recommend_treatments(
    request: &RecommendationRequest<'_>,
) -> Result<RecommendationOutput, RecommendationError> {
    if request.catalog.is_empty() {
        return Err(RecommendationError::EmptyCatalog);
    }
    let exchange_rate = validate_exchange_rate(request.exchange_rate)?;
    let profile = normalize_profile(request.intake, request.reference)?;

    let safety = apply_safety_filter(request.catalog, &profile);
    let relevant_exclusions = relevant_safety_exclusions(&safety.excluded, &profile);
    debug!(
        "Safety filter: {} eligible, {} excluded ({} relevant)",
        safety.eligible.len(),
        safety.excluded.len(),
        relevant_exclusions.len()
    );

    let scored = score_candidates(&safety.eligible, &profile);
    debug!("Scored {} relevant candidates", scored.len());

    let selection = select_within_budget(scored, profile.budget_upper_limit);
    let explanation = explain(&profile, &relevant_exclusions, &selection);

    let mut ranked = selection.selected.clone();
    ranked.sort_by(|a, b| b.score_milli.cmp(&a.score_milli));

    let recommendations: Vec<SelectedTreatment> = ranked
        .into_iter()
        .map(|candidate| SelectedTreatment {
            entry: candidate.entry.clone(),
            relevance_score: candidate.relevance_score,
            session_count: candidate.entry.recommended_sessions.max(1),
            subtotal_krw: candidate.entry.price_krw,
            match_breakdown: candidate.match_breakdown,
        })
        .collect();

    let total_price_krw = selection.total_price_krw;
    let total_price_usd = krw_to_usd(total_price_krw, exchange_rate);

    let ethnicity_note = request
        .reference
        .ethnicity_note(profile.ethnicity_id.as_deref(), &profile.skin_type_id)
        .map(str::to_string);

    info!(
        "Recommendation: {} selected, {} excluded, {} upgrade suggestions, total {} KRW / {} USD",
        recommendations.len(),
        explanation.excluded.len(),
        explanation.upgrade_suggestions.len(),
        total_price_krw,
        total_price_usd
    );

    Ok(RecommendationOutput {
        recommendations,
        total_price_krw,
        total_price_usd,
        excluded: explanation.excluded,
        upgrade_suggestions: explanation.upgrade_suggestions,
        notes: explanation.situations.iter().map(|s| s.render()).collect(),
        ethnicity_note,
        budget_range_id: Some(profile.budget_range_id),
        budget_upper_limit: profile.budget_upper_limit,
    })
}
