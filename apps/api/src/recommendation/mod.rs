// Treatment recommendation engine.
// Pure pipeline: normalize, filter for safety, score, select within budget, convert, explain.
// Only `handlers` touches I/O; everything else is synchronous and deterministic.

pub mod currency;
pub mod engine;
pub mod error;
pub mod explanation;
pub mod handlers;
pub mod normalizer;
pub mod safety;
pub mod scoring;
pub mod selector;
pub mod templates;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{recommend_treatments, RecommendationRequest};
pub use error::RecommendationError;
