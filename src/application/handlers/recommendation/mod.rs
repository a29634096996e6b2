//! Recommendation query handlers.
//!
//! Read-only handlers driving the decision engine over the reader ports.

mod error;
mod get_recommendations;
mod resolve_weights;

pub use error::RecommendationError;
pub use get_recommendations::{
    Candidate, GetRecommendationsHandler, GetRecommendationsQuery, PreferencePayload,
    Recommendation, RecommendationRequest, RecommendationResult,
};
pub use resolve_weights::{ResolveWeightsHandler, ResolveWeightsQuery, ResolveWeightsResult};
