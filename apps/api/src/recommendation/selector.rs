//! Budget Selector: picks the subset of scored candidates with the highest total
//! relevance whose total price stays within the budget ceiling.
//!
//! Exact 0/1 knapsack over reachable prices. Instead of a dense bucket array the
//! search keeps a Pareto frontier of partial selections: a state survives only if no
//! other state is at least as good on score, price and covered concerns. Prices are
//! never rounded, so any KRW granularity is exact.
//!
//! Tie-break order between equal-score subsets:
//! 1. lower total price
//! 2. more distinct concern ids covered
//! 3. earliest catalog positions (lexicographic)

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::recommendation::scoring::ScoredCandidate;

/// Per-candidate progress through one selection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateState {
    Unvisited,
    BucketEvaluated,
    Selected,
    Rejected,
}

impl CandidateState {
    fn evaluate(self) -> Self {
        match self {
            CandidateState::Unvisited => CandidateState::BucketEvaluated,
            other => other,
        }
    }

    fn resolve(self, chosen: bool) -> Self {
        match (self, chosen) {
            (CandidateState::BucketEvaluated, true) => CandidateState::Selected,
            (CandidateState::BucketEvaluated, false) => CandidateState::Rejected,
            (other, _) => other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BudgetSelection<'a> {
    /// Catalog order.
    pub selected: Vec<ScoredCandidate<'a>>,
    /// Eligible and relevant, but left out by the ceiling. Catalog order.
    pub rejected: Vec<ScoredCandidate<'a>>,
    pub total_price_krw: u64,
    pub total_score_milli: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PartialSelection {
    score: u64,
    price: u64,
    /// Positions in the candidate list, ascending.
    members: Vec<usize>,
    /// Interned concern ids covered by `members`.
    covered: BTreeSet<usize>,
}

impl PartialSelection {
    fn empty() -> Self {
        PartialSelection {
            score: 0,
            price: 0,
            members: Vec::new(),
            covered: BTreeSet::new(),
        }
    }

    /// `None` when adding the candidate would pass the ceiling.
    fn extend(
        &self,
        position: usize,
        candidate: &ScoredCandidate<'_>,
        concerns: &BTreeSet<usize>,
        upper_limit: u64,
    ) -> Option<Self> {
        let price = self.price.checked_add(candidate.entry.price_krw)?;
        if price > upper_limit {
            return None;
        }
        let mut members = self.members.clone();
        members.push(position);
        Some(PartialSelection {
            score: self.score.saturating_add(candidate.score_milli),
            price,
            members,
            covered: self.covered.union(concerns).copied().collect(),
        })
    }

    /// True when every completion of `other` is matched or beaten by the same
    /// completion of `self`.
    fn dominates(&self, other: &PartialSelection) -> bool {
        self.score >= other.score
            && self.price <= other.price
            && self.covered.is_superset(&other.covered)
            && compare_selections(self, other) != Ordering::Greater
    }
}

/// Total order on selections; `Less` means `a` is preferred.
fn compare_selections(a: &PartialSelection, b: &PartialSelection) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.price.cmp(&b.price))
        .then_with(|| b.covered.len().cmp(&a.covered.len()))
        .then_with(|| a.members.cmp(&b.members))
}

/// Maps each candidate's matched concern ids to small integers so coverage is a set of ints.
fn intern_concerns(candidates: &[ScoredCandidate<'_>]) -> Vec<BTreeSet<usize>> {
    let mut ids: BTreeMap<&str, usize> = BTreeMap::new();
    candidates
        .iter()
        .map(|candidate| {
            candidate
                .match_breakdown
                .concern_ids
                .iter()
                .map(|id| {
                    let next = ids.len();
                    *ids.entry(id.as_str()).or_insert(next)
                })
                .collect()
        })
        .collect()
}

/// Drops dominated states. Sorting by price then preference puts every dominator
/// ahead of the states it dominates, so one sweep is enough.
fn prune_frontier(mut frontier: Vec<PartialSelection>) -> Vec<PartialSelection> {
    frontier.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| compare_selections(a, b)));
    let mut kept: Vec<PartialSelection> = Vec::with_capacity(frontier.len());
    for state in frontier {
        if !kept.iter().any(|k| k.dominates(&state)) {
            kept.push(state);
        }
    }
    kept
}

/// Chooses the optimal subset. `None` ceiling selects every candidate.
pub fn select_within_budget<'a>(
    candidates: Vec<ScoredCandidate<'a>>,
    budget_upper_limit: Option<u64>,
) -> BudgetSelection<'a> {
    let mut states = vec![CandidateState::Unvisited; candidates.len()];

    let chosen: Vec<usize> = match budget_upper_limit {
        None => {
            for state in states.iter_mut() {
                *state = state.evaluate();
            }
            (0..candidates.len()).collect()
        }
        Some(limit) => knapsack(&candidates, limit, &mut states),
    };

    for (position, state) in states.iter_mut().enumerate() {
        *state = state.resolve(chosen.contains(&position));
    }

    let mut selected = Vec::new();
    let mut rejected = Vec::new();
    for (candidate, state) in candidates.into_iter().zip(states) {
        match state {
            CandidateState::Selected => selected.push(candidate),
            _ => rejected.push(candidate),
        }
    }

    // Saturating: a flexible budget puts no bound on the sum of catalog prices.
    let total_price_krw = selected
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(c.entry.price_krw));
    let total_score_milli = selected
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(c.score_milli));

    debug!(
        "Budget selection: {} selected, {} rejected, total {} KRW",
        selected.len(),
        rejected.len(),
        total_price_krw
    );

    BudgetSelection {
        selected,
        rejected,
        total_price_krw,
        total_score_milli,
    }
}

/// Returns the chosen candidate positions, ascending.
fn knapsack(
    candidates: &[ScoredCandidate<'_>],
    upper_limit: u64,
    states: &mut [CandidateState],
) -> Vec<usize> {
    let concerns = intern_concerns(candidates);
    let mut frontier = vec![PartialSelection::empty()];

    for (position, candidate) in candidates.iter().enumerate() {
        states[position] = states[position].evaluate();

        let extended: Vec<PartialSelection> = frontier
            .iter()
            .filter_map(|s| s.extend(position, candidate, &concerns[position], upper_limit))
            .collect();
        if extended.is_empty() {
            continue;
        }
        frontier.extend(extended);
        frontier = prune_frontier(frontier);
    }

    debug!(
        "Knapsack over {} candidates: {} frontier states at ceiling {} KRW",
        candidates.len(),
        frontier.len(),
        upper_limit
    );

    frontier
        .into_iter()
        .min_by(compare_selections)
        .map(|best| best.members)
        .unwrap_or_default()
}
