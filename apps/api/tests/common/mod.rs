#![allow(dead_code)]
//! Shared fixtures for the integration test binaries.

use std::collections::BTreeSet;

use skinplan_api::models::catalog::{LocalizedName, TreatmentCatalogEntry, TreatmentCategory};
use skinplan_api::models::output::RecommendationOutput;
use skinplan_api::models::profile::{RawConcern, RawIntakeInput};
use skinplan_api::models::reference::ReferenceData;
use skinplan_api::recommendation::{recommend_treatments, RecommendationError, RecommendationRequest};

pub const RATE: f64 = 0.00075;

/// Built-in enumerations, with the `under-500` ceiling replaced by a plain 500 KRW so
/// small hand-written prices exercise the budget.
pub fn reference() -> ReferenceData {
    let mut reference = ReferenceData::builtin().unwrap();
    for range in reference.budget_ranges.iter_mut() {
        if range.id == "under-500" {
            range.upper_limit_krw = Some(500);
        }
    }
    reference
}

fn set(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

pub fn entry(id: &str, price_krw: u64, concerns: &[&str]) -> TreatmentCatalogEntry {
    TreatmentCatalogEntry {
        id: id.to_string(),
        name: LocalizedName {
            ko: id.to_string(),
            en: id.to_string(),
        },
        price_krw,
        category: TreatmentCategory::SkinCondition,
        matched_concern_ids: set(concerns),
        matched_goal_ids: BTreeSet::new(),
        matched_area_ids: BTreeSet::new(),
        contraindications: BTreeSet::new(),
        recency_blocked_by: BTreeSet::new(),
        tier: 1,
        recommended_sessions: 1,
        review_rating: None,
    }
}

pub fn contraindicated(mut entry: TreatmentCatalogEntry, conditions: &[&str]) -> TreatmentCatalogEntry {
    entry.contraindications = set(conditions);
    entry
}

pub fn intake(concerns: &[&str]) -> RawIntakeInput {
    RawIntakeInput {
        concerns: Some(
            concerns
                .iter()
                .map(|id| RawConcern {
                    id: id.to_string(),
                    sub_options: None,
                })
                .collect(),
        ),
        ..Default::default()
    }
}

pub fn run(
    intake: &RawIntakeInput,
    catalog: &[TreatmentCatalogEntry],
    reference: &ReferenceData,
) -> Result<RecommendationOutput, RecommendationError> {
    recommend_treatments(&RecommendationRequest {
        intake,
        catalog,
        exchange_rate: RATE,
        reference,
    })
}

/// A small realistic catalog used by router tests.
pub fn clinic_catalog() -> Vec<TreatmentCatalogEntry> {
    vec![
        entry("aqua-peel", 90_000, &["pores", "dullness"]),
        contraindicated(
            entry("botox-forehead", 150_000, &["wrinkles"]),
            &["pregnant"],
        ),
        entry("pico-toning", 450_000, &["pigmentation"]),
        entry("ulthera", 1_800_000, &["sagging", "wrinkles"]),
    ]
}
