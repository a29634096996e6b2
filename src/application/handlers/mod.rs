//! Application handlers.
//!
//! Query handlers that orchestrate domain operations.

pub mod recommendation;

pub use recommendation::{
    Candidate, GetRecommendationsHandler, GetRecommendationsQuery, RecommendationError,
    RecommendationRequest, RecommendationResult, ResolveWeightsHandler, ResolveWeightsQuery,
    ResolveWeightsResult,
};
