use serde::{Deserialize, Serialize};

use crate::models::catalog::TreatmentCatalogEntry;
use crate::models::output::MatchBreakdown;
use crate::models::profile::{PatientProfile, Priority};
use crate::recommendation::safety::EligibleEntry;

/// Rating assumed for entries without reviews, on a 0–5 scale.
const NEUTRAL_REVIEW_RATING: f64 = 2.5;
const MAX_REVIEW_RATING: f64 = 5.0;
/// Scores are carried as integer milli-points so ties compare exactly.
pub const SCORE_SCALE: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    pub effectiveness: f64,
    pub price: f64,
    pub downtime: f64,
    pub safety: f64,
    pub reviews: f64,
}

impl PriorityWeights {
    pub fn for_priority(priority: Priority) -> Self {
        let base = PriorityWeights {
            effectiveness: 1.0,
            price: 1.0,
            downtime: 1.0,
            safety: 1.0,
            reviews: 1.0,
        };
        match priority {
            Priority::Effectiveness => PriorityWeights {
                effectiveness: 1.5,
                ..base
            },
            Priority::Price => PriorityWeights { price: 2.0, ..base },
            Priority::MinimalDowntime => PriorityWeights {
                downtime: 2.0,
                ..base
            },
            Priority::Safety => PriorityWeights {
                safety: 2.0,
                ..base
            },
            Priority::Reviews => PriorityWeights {
                reviews: 2.0,
                ..base
            },
        }
    }
}

/// Per-entry factors in (0, 1] that the priority weights multiply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryFactors {
    pub price: f64,
    pub downtime: f64,
    pub safety: f64,
    pub reviews: f64,
}

impl EntryFactors {
    pub fn for_entry(entry: &TreatmentCatalogEntry, cheapest_price: u64) -> Self {
        let price = if entry.price_krw == 0 {
            1.0
        } else {
            (cheapest_price as f64 / entry.price_krw as f64).clamp(0.0, 1.0)
        };
        let inverse_tier = 1.0 / entry.effective_tier() as f64;
        let reviews = entry
            .review_rating
            .unwrap_or(NEUTRAL_REVIEW_RATING)
            .clamp(0.0, MAX_REVIEW_RATING)
            / MAX_REVIEW_RATING;
        EntryFactors {
            price,
            downtime: inverse_tier,
            safety: inverse_tier,
            reviews,
        }
    }
}

/// Weighted multiplier applied to each overlap point.
pub fn priority_multiplier(weights: &PriorityWeights, factors: &EntryFactors) -> f64 {
    weights.effectiveness
        + weights.price * factors.price
        + weights.downtime * factors.downtime
        + weights.safety * factors.safety
        + weights.reviews * factors.reviews
}

#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    /// Catalog insertion position.
    pub index: usize,
    pub entry: &'a TreatmentCatalogEntry,
    pub relevance_score: f64,
    pub score_milli: u64,
    pub match_breakdown: MatchBreakdown,
}

pub fn compute_match_breakdown(
    entry: &TreatmentCatalogEntry,
    profile: &PatientProfile,
) -> MatchBreakdown {
    MatchBreakdown {
        concern_ids: profile
            .standard_concern_ids()
            .filter(|id| entry.matched_concern_ids.contains(*id))
            .map(str::to_string)
            .collect(),
        goal_ids: profile
            .goal_ids
            .iter()
            .filter(|id| entry.matched_goal_ids.contains(id.as_str()))
            .cloned()
            .collect(),
        area_ids: profile
            .area_ids
            .iter()
            .filter(|id| entry.matched_area_ids.contains(id.as_str()))
            .cloned()
            .collect(),
    }
}

/// Scores every safety-eligible entry. Zero-overlap entries are dropped, not scored at zero.
///
/// Returned in catalog order.
pub fn score_candidates<'a>(
    eligible: &[EligibleEntry<'a>],
    profile: &PatientProfile,
) -> Vec<ScoredCandidate<'a>> {
    let weights = PriorityWeights::for_priority(profile.priority);

    let matched: Vec<(EligibleEntry<'a>, MatchBreakdown)> = eligible
        .iter()
        .map(|e| (*e, compute_match_breakdown(e.entry, profile)))
        .filter(|(_, breakdown)| breakdown.overlap_count() > 0)
        .collect();

    let cheapest_price = matched
        .iter()
        .map(|(e, _)| e.entry.price_krw)
        .min()
        .unwrap_or(0);

    matched
        .into_iter()
        .map(|(eligible, match_breakdown)| {
            let factors = EntryFactors::for_entry(eligible.entry, cheapest_price);
            let raw = match_breakdown.overlap_count() as f64
                * priority_multiplier(&weights, &factors);
            let score_milli = (raw * SCORE_SCALE).round() as u64;
            ScoredCandidate {
                index: eligible.index,
                entry: eligible.entry,
                relevance_score: score_milli as f64 / SCORE_SCALE,
                score_milli,
                match_breakdown,
            }
        })
        .collect()
}
