//! Safety Filter: removes entries that are contraindicated or blocked by a recent treatment.
//!
//! Exclusion here is terminal. Nothing downstream may bring an entry back.

use crate::models::catalog::TreatmentCatalogEntry;
use crate::models::profile::PatientProfile;

#[derive(Debug, Clone, PartialEq)]
pub enum SafetyBlock {
    Contraindicated(Vec<String>),
    RecentTreatment(Vec<String>),
}

/// A catalog entry the profile must never be offered, with the conflicting ids.
#[derive(Debug, Clone)]
pub struct SafetyExclusion<'a> {
    pub index: usize,
    pub entry: &'a TreatmentCatalogEntry,
    pub blocks: Vec<SafetyBlock>,
}

impl SafetyExclusion<'_> {
    pub fn is_recency_only(&self) -> bool {
        self.blocks
            .iter()
            .all(|b| matches!(b, SafetyBlock::RecentTreatment(_)))
    }

    pub fn detail(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match block {
                SafetyBlock::Contraindicated(ids) => {
                    format!("Contraindicated for: {}", ids.join(", "))
                }
                SafetyBlock::RecentTreatment(ids) => {
                    format!("Too soon after: {}", ids.join(", "))
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Entry that passed the filter; `index` is its catalog insertion position.
#[derive(Debug, Clone, Copy)]
pub struct EligibleEntry<'a> {
    pub index: usize,
    pub entry: &'a TreatmentCatalogEntry,
}

#[derive(Debug, Clone, Default)]
pub struct SafetyOutcome<'a> {
    pub eligible: Vec<EligibleEntry<'a>>,
    pub excluded: Vec<SafetyExclusion<'a>>,
}

pub fn apply_safety_filter<'a>(
    catalog: &'a [TreatmentCatalogEntry],
    profile: &PatientProfile,
) -> SafetyOutcome<'a> {
    let ignore_recency = profile.has_no_prior_treatments();
    let mut outcome = SafetyOutcome::default();

    for (index, entry) in catalog.iter().enumerate() {
        let mut blocks = Vec::new();

        let conditions: Vec<String> = profile
            .medical_condition_ids
            .iter()
            .filter(|id| entry.contraindications.contains(id.as_str()))
            .cloned()
            .collect();
        if !conditions.is_empty() {
            blocks.push(SafetyBlock::Contraindicated(conditions));
        }

        if !ignore_recency {
            let recent: Vec<String> = profile
                .past_treatment_ids
                .iter()
                .filter(|id| entry.recency_blocked_by.contains(id.as_str()))
                .cloned()
                .collect();
            if !recent.is_empty() {
                blocks.push(SafetyBlock::RecentTreatment(recent));
            }
        }

        if blocks.is_empty() {
            outcome.eligible.push(EligibleEntry { index, entry });
        } else {
            outcome.excluded.push(SafetyExclusion {
                index,
                entry,
                blocks,
            });
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::test_support::{make_entry, make_profile};

    fn entry(id: &str, contraindications: &[&str], blocked_by: &[&str]) -> TreatmentCatalogEntry {
        make_entry(id, 100_000)
            .contraindications(contraindications)
            .blocked_by(blocked_by)
            .build()
    }

    fn profile(conditions: &[&str], past: &[&str]) -> PatientProfile {
        make_profile().conditions(conditions).past_treatments(past).build()
    }

    #[test]
    fn test_contraindicated_entry_is_excluded() {
        let catalog = vec![
            entry("botox", &["pregnant"], &[]),
            entry("aqua-peel", &[], &[]),
        ];
        let outcome = apply_safety_filter(&catalog, &profile(&["pregnant"], &["none"]));
        assert_eq!(outcome.eligible.len(), 1);
        assert_eq!(outcome.eligible[0].entry.id, "aqua-peel");
        assert_eq!(outcome.excluded.len(), 1);
        assert_eq!(outcome.excluded[0].index, 0);
        assert!(outcome.excluded[0].detail().contains("pregnant"));
        assert!(!outcome.excluded[0].is_recency_only());
    }

    #[test]
    fn test_recent_laser_blocks_other_lasers() {
        let catalog = vec![
            entry("pico-toning", &[], &["recent_laser"]),
            entry("ldm", &[], &[]),
        ];
        let outcome = apply_safety_filter(&catalog, &profile(&["none"], &["recent_laser"]));
        assert_eq!(outcome.excluded.len(), 1);
        assert!(outcome.excluded[0].is_recency_only());
        assert!(outcome.excluded[0].detail().starts_with("Too soon after"));
    }

    #[test]
    fn test_never_means_no_recency_blocks() {
        // A catalog that (oddly) lists the sentinel itself must still not block.
        let catalog = vec![entry("pico-toning", &[], &["never"])];
        let outcome = apply_safety_filter(&catalog, &profile(&["none"], &["never"]));
        assert_eq!(outcome.eligible.len(), 1);
        assert!(outcome.excluded.is_empty());
    }

    #[test]
    fn test_both_blocks_are_reported() {
        let catalog = vec![entry("co2-laser", &["keloid"], &["recent_peel"])];
        let outcome = apply_safety_filter(&catalog, &profile(&["keloid"], &["recent_peel"]));
        let detail = outcome.excluded[0].detail();
        assert!(detail.contains("keloid"));
        assert!(detail.contains("recent_peel"));
    }

    #[test]
    fn test_indices_follow_catalog_order() {
        let catalog = vec![
            entry("a", &[], &[]),
            entry("b", &["pregnant"], &[]),
            entry("c", &[], &[]),
        ];
        let outcome = apply_safety_filter(&catalog, &profile(&["pregnant"], &["none"]));
        let indices: Vec<usize> = outcome.eligible.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }
}
