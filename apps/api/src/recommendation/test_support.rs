//! Fixture builders shared by the engine's unit tests.

use crate::models::catalog::{LocalizedName, TreatmentCatalogEntry, TreatmentCategory};
use crate::models::profile::{Concern, PatientProfile, Priority};

fn set(ids: &[&str]) -> std::collections::BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

pub struct EntryBuilder(TreatmentCatalogEntry);

pub fn make_entry(id: &str, price_krw: u64) -> EntryBuilder {
    EntryBuilder(TreatmentCatalogEntry {
        id: id.to_string(),
        name: LocalizedName {
            ko: id.to_string(),
            en: id.to_string(),
        },
        price_krw,
        category: TreatmentCategory::SkinCondition,
        matched_concern_ids: Default::default(),
        matched_goal_ids: Default::default(),
        matched_area_ids: Default::default(),
        contraindications: Default::default(),
        recency_blocked_by: Default::default(),
        tier: 1,
        recommended_sessions: 1,
        review_rating: None,
    })
}

impl EntryBuilder {
    pub fn concerns(mut self, ids: &[&str]) -> Self {
        self.0.matched_concern_ids = set(ids);
        self
    }

    pub fn goals(mut self, ids: &[&str]) -> Self {
        self.0.matched_goal_ids = set(ids);
        self
    }

    pub fn areas(mut self, ids: &[&str]) -> Self {
        self.0.matched_area_ids = set(ids);
        self
    }

    pub fn contraindications(mut self, ids: &[&str]) -> Self {
        self.0.contraindications = set(ids);
        self
    }

    pub fn blocked_by(mut self, ids: &[&str]) -> Self {
        self.0.recency_blocked_by = set(ids);
        self
    }

    pub fn tier(mut self, tier: u8) -> Self {
        self.0.tier = tier;
        self
    }

    pub fn sessions(mut self, sessions: u32) -> Self {
        self.0.recommended_sessions = sessions;
        self
    }

    pub fn review_rating(mut self, rating: f64) -> Self {
        self.0.review_rating = Some(rating);
        self
    }

    pub fn build(self) -> TreatmentCatalogEntry {
        self.0
    }
}

pub struct ProfileBuilder(PatientProfile);

pub fn make_profile() -> ProfileBuilder {
    ProfileBuilder(PatientProfile {
        skin_type_id: "combination".to_string(),
        concerns: vec![],
        goal_ids: vec![],
        area_ids: vec![],
        budget_range_id: "flexible".to_string(),
        budget_upper_limit: None,
        priority: Priority::Effectiveness,
        past_treatment_ids: vec!["none".to_string()],
        medical_condition_ids: vec!["none".to_string()],
        ethnicity_id: None,
    })
}

impl ProfileBuilder {
    pub fn concerns(mut self, ids: &[&str]) -> Self {
        self.0.concerns = ids
            .iter()
            .map(|id| Concern::Standard { id: id.to_string() })
            .collect();
        self
    }

    pub fn other_concern(mut self, detail: &str) -> Self {
        self.0.concerns.push(Concern::Other {
            detail: detail.to_string(),
        });
        self
    }

    pub fn goals(mut self, ids: &[&str]) -> Self {
        self.0.goal_ids = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn areas(mut self, ids: &[&str]) -> Self {
        self.0.area_ids = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.0.priority = priority;
        self
    }

    pub fn budget(mut self, range_id: &str, upper_limit: Option<u64>) -> Self {
        self.0.budget_range_id = range_id.to_string();
        self.0.budget_upper_limit = upper_limit;
        self
    }

    pub fn conditions(mut self, ids: &[&str]) -> Self {
        self.0.medical_condition_ids = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn past_treatments(mut self, ids: &[&str]) -> Self {
        self.0.past_treatment_ids = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn skin_type(mut self, id: &str) -> Self {
        self.0.skin_type_id = id.to_string();
        self
    }

    pub fn ethnicity(mut self, id: &str) -> Self {
        self.0.ethnicity_id = Some(id.to_string());
        self
    }

    pub fn build(self) -> PatientProfile {
        self.0
    }
}
