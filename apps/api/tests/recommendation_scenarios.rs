//! End-to-end scenarios through the public entry point.

mod common;

use common::{contraindicated, entry, intake, reference, run, RATE};
use skinplan_api::models::output::ExclusionReason;
use skinplan_api::models::profile::{RawConcern, RawIntakeInput};
use skinplan_api::recommendation::templates::{
    NOTE_BUDGET_REACHED, NOTE_NO_MATCH, NOTE_SAFETY_EXCLUSIONS,
};
use skinplan_api::recommendation::RecommendationError;

#[test]
fn test_pregnancy_contraindication_is_excluded_for_safety() {
    let reference = reference();
    let raw = RawIntakeInput {
        medical_condition_ids: Some(vec!["pregnant".to_string()]),
        ..intake(&["wrinkles"])
    };
    let catalog = vec![contraindicated(
        entry("botox", 150_000, &["wrinkles"]),
        &["pregnant"],
    )];

    let output = run(&raw, &catalog, &reference).unwrap();

    assert!(output.recommendations.is_empty());
    assert_eq!(output.excluded.len(), 1);
    assert_eq!(output.excluded[0].entry.id, "botox");
    assert_eq!(output.excluded[0].reason, ExclusionReason::Safety);
    assert!(output.excluded[0].detail.contains("pregnant"));
    assert!(output.upgrade_suggestions.is_empty());
    assert!(output.notes.contains(&NOTE_SAFETY_EXCLUSIONS.to_string()));
}

#[test]
fn test_budget_picks_cheaper_and_suggests_upgrade() {
    let reference = reference();
    let raw = RawIntakeInput {
        budget_range_id: Some("under-500".to_string()),
        ..intake(&["acne"])
    };
    let catalog = vec![entry("peel-300", 300, &["acne"]), entry("laser-400", 400, &["acne"])];

    let output = run(&raw, &catalog, &reference).unwrap();

    let selected: Vec<&str> = output
        .recommendations
        .iter()
        .map(|r| r.entry.id.as_str())
        .collect();
    assert_eq!(selected, vec!["peel-300"]);
    assert_eq!(output.total_price_krw, 300);
    assert_eq!(output.budget_upper_limit, Some(500));

    assert_eq!(output.upgrade_suggestions.len(), 1);
    assert_eq!(output.upgrade_suggestions[0].entry.id, "laser-400");
    assert_eq!(output.upgrade_suggestions[0].extra_budget_needed_krw, 200);

    assert_eq!(output.excluded.len(), 1);
    assert_eq!(output.excluded[0].reason, ExclusionReason::Budget);
    assert!(output.notes.contains(&NOTE_BUDGET_REACHED.to_string()));
}

#[test]
fn test_no_overlap_gives_empty_result_with_note() {
    let reference = reference();
    let raw = RawIntakeInput {
        goal_ids: Some(vec!["hydration".to_string()]),
        ..intake(&["redness"])
    };
    let catalog = vec![
        entry("thread-lift", 900_000, &["sagging"]),
        entry("jaw-botox", 120_000, &[]),
    ];

    let output = run(&raw, &catalog, &reference).unwrap();

    assert!(output.recommendations.is_empty());
    assert!(output.excluded.is_empty());
    assert!(output.upgrade_suggestions.is_empty());
    assert!(output.notes.contains(&NOTE_NO_MATCH.to_string()));
    assert_eq!(output.total_price_usd, 0);
}

#[test]
fn test_identical_calls_yield_identical_output() {
    let reference = reference();
    let raw = RawIntakeInput {
        budget_range_id: Some("500-1000".to_string()),
        priority_id: Some("price".to_string()),
        area_ids: Some(vec!["cheeks".to_string()]),
        ..intake(&["acne", "pores", "pigmentation"])
    };
    let catalog = vec![
        entry("a", 300_000, &["acne"]),
        entry("b", 300_000, &["pores"]),
        entry("c", 600_000, &["acne", "pigmentation"]),
        entry("d", 450_000, &["pigmentation"]),
        entry("e", 700_000, &["pores", "acne"]),
    ];

    let first = run(&raw, &catalog, &reference).unwrap();
    let second = run(&raw, &catalog, &reference).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_flexible_budget_selects_all_relevant() {
    let reference = reference();
    let raw = RawIntakeInput {
        budget_range_id: Some("flexible".to_string()),
        ..intake(&["sagging"])
    };
    let catalog = vec![
        entry("thermage", 3_500_000, &["sagging"]),
        entry("ulthera", 2_200_000, &["sagging"]),
        entry("unrelated", 50_000, &["acne"]),
    ];

    let output = run(&raw, &catalog, &reference).unwrap();

    assert_eq!(output.recommendations.len(), 2);
    assert_eq!(output.total_price_krw, 5_700_000);
    assert_eq!(output.budget_upper_limit, None);
    assert!(output.upgrade_suggestions.is_empty());
    assert!(output.excluded.is_empty());

    let json = serde_json::to_value(&output).unwrap();
    assert!(json.get("budgetUpperLimit").is_none());
    assert_eq!(json["budgetRangeId"], "flexible");
}

#[test]
fn test_usd_total_uses_injected_rate() {
    let reference = reference();
    let raw = intake(&["acne"]);
    let catalog = vec![entry("peel", 1_000_000, &["acne"])];

    let output = run(&raw, &catalog, &reference).unwrap();
    assert_eq!(output.total_price_usd, (1_000_000f64 * RATE).round() as u64);
}

#[test]
fn test_unknown_id_is_validation_error() {
    let reference = reference();
    let raw = RawIntakeInput {
        skin_type_id: Some("scaly".to_string()),
        ..intake(&["acne"])
    };
    let catalog = vec![entry("peel", 100_000, &["acne"])];

    match run(&raw, &catalog, &reference) {
        Err(RecommendationError::Validation { field, .. }) => assert_eq!(field, "skinTypeId"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_other_concern_detail_surfaces_in_notes() {
    let reference = reference();
    let raw = RawIntakeInput {
        concerns: Some(vec![
            RawConcern {
                id: "acne".to_string(),
                sub_options: None,
            },
            RawConcern {
                id: "other".to_string(),
                sub_options: Some(vec![" under-eye hollows ".to_string()]),
            },
        ]),
        ..Default::default()
    };
    let catalog = vec![entry("peel", 100_000, &["acne"])];

    let output = run(&raw, &catalog, &reference).unwrap();
    assert_eq!(output.recommendations.len(), 1);
    assert!(output.notes.iter().any(|n| n.contains("(under-eye hollows)")));
}

#[test]
fn test_recent_laser_defers_laser_entries() {
    let reference = reference();
    let mut pico = entry("pico", 200_000, &["pigmentation"]);
    pico.recency_blocked_by.insert("recent_laser".to_string());
    let catalog = vec![pico, entry("vitamin-drip", 80_000, &["pigmentation"])];

    let raw = RawIntakeInput {
        past_treatment_ids: Some(vec!["recent_laser".to_string()]),
        ..intake(&["pigmentation"])
    };
    let output = run(&raw, &catalog, &reference).unwrap();
    assert_eq!(output.recommendations.len(), 1);
    assert_eq!(output.recommendations[0].entry.id, "vitamin-drip");
    assert_eq!(output.excluded[0].entry.id, "pico");
    assert_eq!(output.excluded[0].reason, ExclusionReason::Safety);

    let raw = RawIntakeInput {
        past_treatment_ids: Some(vec!["never".to_string()]),
        ..intake(&["pigmentation"])
    };
    let output = run(&raw, &catalog, &reference).unwrap();
    assert_eq!(output.recommendations.len(), 2);
}
