//! Application layer - Queries and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    Candidate, GetRecommendationsHandler, GetRecommendationsQuery, RecommendationError,
    RecommendationRequest, RecommendationResult, ResolveWeightsHandler, ResolveWeightsQuery,
    ResolveWeightsResult,
};
