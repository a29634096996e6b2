//! GetRecommendationsHandler - Query handler for ranked listing recommendations.
//!
//! Orchestrates one request end to end:
//! reference data → weights → evaluation plan → attributes → matrix →
//! TOPSIS → explanations → limit.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::RecommendationError;
use crate::config::EngineConfig;
use crate::domain::foundation::{AlternativeId, ErrorCode, ValidationError};
use crate::domain::preferences::{
    explain_weights, Preferences, WeightExplanation, WeightResolver, WeightVector,
};
use crate::domain::ranking::{
    proximity_note, DecisionMatrix, EvaluationPlan, Explainer, RankedResult, TopsisRanker,
};
use crate::ports::{AttributeReader, CriterionCatalogReader, InfluenceGraphReader};

/// One alternative to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: AlternativeId,
    /// Distance from the caller's location, computed by the caller.
    #[serde(default)]
    pub distance_km: Option<f64>,
}

impl Candidate {
    pub fn new(id: impl Into<AlternativeId>) -> Self {
        Self {
            id: id.into(),
            distance_km: None,
        }
    }

    pub fn at_distance(id: impl Into<AlternativeId>, distance_km: f64) -> Self {
        Self {
            id: id.into(),
            distance_km: Some(distance_km),
        }
    }
}

/// Query for ranked recommendations.
#[derive(Debug, Clone)]
pub struct GetRecommendationsQuery {
    pub preferences: Preferences,
    pub candidates: Vec<Candidate>,
    /// Number of results to return; the configured default when absent.
    pub limit: Option<u32>,
}

/// Preferences as they arrive on the wire: tagged, or a flat scalar map.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PreferencePayload {
    Tagged(Preferences),
    Scalars(HashMap<String, f64>),
}

impl From<PreferencePayload> for Preferences {
    fn from(payload: PreferencePayload) -> Self {
        match payload {
            PreferencePayload::Tagged(preferences) => preferences,
            PreferencePayload::Scalars(scalars) => Preferences::from_scalars(&scalars),
        }
    }
}

/// Wire form of a recommendation request.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub preferences: PreferencePayload,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl From<RecommendationRequest> for GetRecommendationsQuery {
    fn from(request: RecommendationRequest) -> Self {
        Self {
            preferences: request.preferences.into(),
            candidates: request.candidates,
            limit: request.limit,
        }
    }
}

/// A ranked result with the caller-supplied distance attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub result: RankedResult,
    pub distance_km: Option<f64>,
}

/// Result envelope of a recommendation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub session_id: Uuid,
    /// Distinct candidates submitted, before the limit is applied.
    pub total_evaluated: usize,
    pub computed_weights: WeightVector,
    pub weight_explanations: Vec<WeightExplanation>,
    pub ranked_results: Vec<Recommendation>,
    pub processing_time_ms: f64,
}

/// Handler producing ranked, explained recommendations.
///
/// Holds no per-request state; one instance serves concurrent requests.
pub struct GetRecommendationsHandler {
    catalog_reader: Arc<dyn CriterionCatalogReader>,
    graph_reader: Arc<dyn InfluenceGraphReader>,
    attribute_reader: Arc<dyn AttributeReader>,
    limits: EngineConfig,
}

impl GetRecommendationsHandler {
    pub fn new(
        catalog_reader: Arc<dyn CriterionCatalogReader>,
        graph_reader: Arc<dyn InfluenceGraphReader>,
        attribute_reader: Arc<dyn AttributeReader>,
        limits: EngineConfig,
    ) -> Self {
        Self {
            catalog_reader,
            graph_reader,
            attribute_reader,
            limits,
        }
    }

    pub async fn handle(
        &self,
        query: GetRecommendationsQuery,
    ) -> Result<RecommendationResult, RecommendationError> {
        let started = Instant::now();
        let session_id = Uuid::new_v4();

        let limit = self.validate_limit(query.limit)?;
        query.preferences.validate()?;
        let candidates = self.collapse_candidates(query.candidates)?;
        let ids: Vec<AlternativeId> = candidates.keys().copied().collect();

        let (catalog, graph) = tokio::try_join!(
            self.catalog_reader.load_catalog(),
            self.graph_reader.load_graph()
        )?;

        let computed_weights = WeightResolver::new(&graph).resolve(&query.preferences);
        let weight_explanations = explain_weights(&computed_weights, &catalog);

        let mut ranked_results = Vec::new();
        if !ids.is_empty() {
            let plan = EvaluationPlan::new(&computed_weights, &catalog);
            let codes = plan.codes();
            let attributes = self.attribute_reader.read_attributes(&ids, &codes).await?;
            let matrix = DecisionMatrix::from_attributes(&ids, &codes, attributes);
            debug!(
                alternatives = matrix.alternative_count(),
                criteria = matrix.criterion_count(),
                "Built decision matrix"
            );

            let mut ranked = TopsisRanker::rank(&matrix, &plan)?;
            Explainer::annotate(&mut ranked, &matrix, &plan);
            ranked.truncate(limit);

            ranked_results = ranked
                .into_iter()
                .map(|mut result| {
                    let distance_km = candidates.get(&result.alternative_id).copied().flatten();
                    if let Some(distance) = distance_km {
                        result.explanation.push_str(&proximity_note(distance));
                    }
                    Recommendation {
                        result,
                        distance_km,
                    }
                })
                .collect();
        }

        let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        info!(
            %session_id,
            total_evaluated = ids.len(),
            returned = ranked_results.len(),
            processing_time_ms,
            "Recommendations computed"
        );

        Ok(RecommendationResult {
            session_id,
            total_evaluated: ids.len(),
            computed_weights,
            weight_explanations,
            ranked_results,
            processing_time_ms,
        })
    }

    fn validate_limit(&self, limit: Option<u32>) -> Result<usize, RecommendationError> {
        let limit = limit.unwrap_or(self.limits.default_limit);
        if limit == 0 || limit > self.limits.max_result_limit {
            return Err(RecommendationError::invalid_input(
                ErrorCode::InvalidLimit,
                format!(
                    "limit must be between 1 and {}, got {}",
                    self.limits.max_result_limit, limit
                ),
            ));
        }
        Ok(limit as usize)
    }

    /// Collapses duplicate ids (first occurrence wins) and enforces the cap.
    fn collapse_candidates(
        &self,
        candidates: Vec<Candidate>,
    ) -> Result<BTreeMap<AlternativeId, Option<f64>>, RecommendationError> {
        let mut collapsed = BTreeMap::new();
        for candidate in candidates {
            if let Some(distance) = candidate.distance_km {
                if !distance.is_finite() || distance < 0.0 {
                    return Err(ValidationError::not_non_negative("distance_km", distance).into());
                }
            }
            collapsed.entry(candidate.id).or_insert(candidate.distance_km);
        }

        if collapsed.len() > self.limits.max_candidates as usize {
            return Err(RecommendationError::invalid_input(
                ErrorCode::TooManyCandidates,
                format!(
                    "at most {} candidates allowed, got {}",
                    self.limits.max_candidates,
                    collapsed.len()
                ),
            ));
        }
        Ok(collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryAttributeStore, InMemoryCatalogReader, InMemoryInfluenceGraphReader,
    };
    use crate::domain::catalog::{CriterionCatalog, InfluenceGraph};
    use crate::domain::foundation::CriterionCode;
    use crate::domain::preferences::DirectPreferences;
    use crate::domain::ranking::AttributeValue;
    use crate::ports::DataSourceError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ─────────────────────────────────────────────────────────────────────
    // Mock Implementations
    // ─────────────────────────────────────────────────────────────────────

    struct MockAttributeReader {
        values: Vec<AttributeValue>,
        should_fail: bool,
        requested_criteria: Mutex<Vec<CriterionCode>>,
        calls: Mutex<usize>,
    }

    impl MockAttributeReader {
        fn with_values(values: Vec<AttributeValue>) -> Self {
            Self {
                values,
                should_fail: false,
                requested_criteria: Mutex::new(Vec::new()),
                calls: Mutex::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                should_fail: true,
                ..Self::with_values(Vec::new())
            }
        }
    }

    #[async_trait]
    impl AttributeReader for MockAttributeReader {
        async fn read_attributes(
            &self,
            alternatives: &[AlternativeId],
            criteria: &[CriterionCode],
        ) -> Result<Vec<AttributeValue>, DataSourceError> {
            *self.calls.lock().unwrap() += 1;
            *self.requested_criteria.lock().unwrap() = criteria.to_vec();
            if self.should_fail {
                return Err(DataSourceError::Database("Simulated failure".to_string()));
            }
            Ok(self
                .values
                .iter()
                .filter(|v| alternatives.contains(&v.alternative_id))
                .cloned()
                .collect())
        }
    }

    struct FailingCatalogReader;

    #[async_trait]
    impl CriterionCatalogReader for FailingCatalogReader {
        async fn load_catalog(&self) -> Result<CriterionCatalog, DataSourceError> {
            Err(DataSourceError::Database("connection refused".to_string()))
        }
    }

    struct EmptyGraphReader;

    #[async_trait]
    impl InfluenceGraphReader for EmptyGraphReader {
        async fn load_graph(&self) -> Result<InfluenceGraph, DataSourceError> {
            Ok(InfluenceGraph::default())
        }
    }

    fn price_and_comfort() -> Preferences {
        Preferences::Direct(DirectPreferences {
            price_sensitivity: 0.5,
            comfort_priority: 1.25,
            distance_tolerance: 0.0,
            view_importance: 0.0,
            cleanliness_priority: 0.0,
        })
    }

    fn handler_with(reader: Arc<dyn AttributeReader>) -> GetRecommendationsHandler {
        GetRecommendationsHandler::new(
            Arc::new(InMemoryCatalogReader::seeded()),
            Arc::new(EmptyGraphReader),
            reader,
            EngineConfig::default(),
        )
    }

    fn dominance_values() -> Vec<AttributeValue> {
        vec![
            AttributeValue::new(1, "PRICE", 100.0),
            AttributeValue::new(1, "RATING_OVERALL", 4.0),
            AttributeValue::new(2, "PRICE", 50.0),
            AttributeValue::new(2, "RATING_OVERALL", 5.0),
        ]
    }

    fn query(candidates: Vec<Candidate>, limit: Option<u32>) -> GetRecommendationsQuery {
        GetRecommendationsQuery {
            preferences: price_and_comfort(),
            candidates,
            limit,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tests
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_dominating_listing_ranks_first() {
        let handler = handler_with(Arc::new(MockAttributeReader::with_values(dominance_values())));

        let result = handler
            .handle(query(vec![Candidate::new(1), Candidate::new(2)], None))
            .await
            .unwrap();

        assert_eq!(result.total_evaluated, 2);
        assert_eq!(result.ranked_results.len(), 2);
        let best = &result.ranked_results[0].result;
        assert_eq!(best.alternative_id, AlternativeId::new(2));
        assert_eq!(best.rank, 1);
        assert!(best.score > result.ranked_results[1].result.score);
        assert!(best.explanation.starts_with("Best overall match"));
    }

    #[tokio::test]
    async fn test_zero_weighted_criteria_are_still_evaluated() {
        let reader = Arc::new(MockAttributeReader::with_values(dominance_values()));
        let handler = handler_with(reader.clone());

        handler
            .handle(query(vec![Candidate::new(1)], None))
            .await
            .unwrap();

        // Direct mode always yields seven weighted criteria, all active in the seed catalog.
        assert_eq!(reader.requested_criteria.lock().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_empty_candidates_return_empty_result() {
        let reader = Arc::new(MockAttributeReader::with_values(dominance_values()));
        let handler = handler_with(reader.clone());

        let result = handler.handle(query(Vec::new(), None)).await.unwrap();

        assert_eq!(result.total_evaluated, 0);
        assert!(result.ranked_results.is_empty());
        assert_eq!(result.computed_weights.len(), 7);
        assert_eq!(*reader.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_limit_truncates_after_ranking() {
        let store = InMemoryAttributeStore::new()
            .with_alternative(1, &[("PRICE", 100.0), ("RATING_OVERALL", 4.0)])
            .with_alternative(2, &[("PRICE", 50.0), ("RATING_OVERALL", 5.0)])
            .with_alternative(3, &[("PRICE", 75.0), ("RATING_OVERALL", 4.5)]);
        let handler = handler_with(Arc::new(store));

        let result = handler
            .handle(query(
                vec![Candidate::new(1), Candidate::new(2), Candidate::new(3)],
                Some(1),
            ))
            .await
            .unwrap();

        assert_eq!(result.total_evaluated, 3);
        assert_eq!(result.ranked_results.len(), 1);
        assert_eq!(result.ranked_results[0].result.alternative_id, AlternativeId::new(2));
    }

    #[tokio::test]
    async fn test_limit_out_of_range_is_rejected() {
        let handler = handler_with(Arc::new(MockAttributeReader::with_values(Vec::new())));

        for limit in [0, 101] {
            let result = handler.handle(query(vec![Candidate::new(1)], Some(limit))).await;
            assert!(matches!(
                result,
                Err(RecommendationError::InvalidInput {
                    code: ErrorCode::InvalidLimit,
                    ..
                })
            ));
        }
    }

    #[tokio::test]
    async fn test_too_many_candidates_are_rejected() {
        let handler = GetRecommendationsHandler::new(
            Arc::new(InMemoryCatalogReader::seeded()),
            Arc::new(EmptyGraphReader),
            Arc::new(MockAttributeReader::with_values(Vec::new())),
            EngineConfig {
                max_candidates: 2,
                ..Default::default()
            },
        );

        let result = handler
            .handle(query((1..=3i64).map(Candidate::new).collect(), None))
            .await;
        assert!(matches!(
            result,
            Err(RecommendationError::InvalidInput {
                code: ErrorCode::TooManyCandidates,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_duplicate_candidates_are_collapsed() {
        let handler = handler_with(Arc::new(MockAttributeReader::with_values(dominance_values())));

        let result = handler
            .handle(query(
                vec![
                    Candidate::at_distance(2, 0.5),
                    Candidate::new(1),
                    Candidate::at_distance(2, 9.0),
                ],
                None,
            ))
            .await
            .unwrap();

        assert_eq!(result.total_evaluated, 2);
        assert_eq!(result.ranked_results.len(), 2);
        assert_eq!(result.ranked_results[0].distance_km, Some(0.5));
    }

    #[tokio::test]
    async fn test_distance_adds_proximity_note() {
        let handler = handler_with(Arc::new(MockAttributeReader::with_values(dominance_values())));

        let result = handler
            .handle(query(
                vec![Candidate::at_distance(1, 12.0), Candidate::at_distance(2, 2.4)],
                None,
            ))
            .await
            .unwrap();

        assert!(result.ranked_results[0]
            .result
            .explanation
            .ends_with(". Nearby (2.4 km)"));
        assert!(result.ranked_results[1]
            .result
            .explanation
            .ends_with(". Distance: 12.0 km"));
    }

    #[tokio::test]
    async fn test_negative_distance_is_rejected() {
        let handler = handler_with(Arc::new(MockAttributeReader::with_values(Vec::new())));
        let result = handler
            .handle(query(vec![Candidate::at_distance(1, -1.0)], None))
            .await;
        assert!(matches!(result, Err(RecommendationError::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_listing_without_attributes_is_left_out() {
        let handler = handler_with(Arc::new(MockAttributeReader::with_values(dominance_values())));

        let result = handler
            .handle(query(vec![Candidate::new(1), Candidate::new(2), Candidate::new(99)], None))
            .await
            .unwrap();

        assert_eq!(result.total_evaluated, 3);
        assert_eq!(result.ranked_results.len(), 2);
    }

    #[tokio::test]
    async fn test_catalog_failure_surfaces_without_partial_result() {
        let handler = GetRecommendationsHandler::new(
            Arc::new(FailingCatalogReader),
            Arc::new(InMemoryInfluenceGraphReader::seeded()),
            Arc::new(MockAttributeReader::with_values(dominance_values())),
            EngineConfig::default(),
        );

        let result = handler.handle(query(vec![Candidate::new(1)], None)).await;
        assert!(matches!(result, Err(RecommendationError::DataSource(_))));
    }

    #[tokio::test]
    async fn test_attribute_failure_surfaces() {
        let handler = handler_with(Arc::new(MockAttributeReader::failing()));
        let result = handler.handle(query(vec![Candidate::new(1)], None)).await;
        assert!(matches!(result, Err(RecommendationError::DataSource(_))));
    }

    #[test]
    fn test_request_accepts_flat_scalar_preferences() {
        let request: RecommendationRequest = serde_json::from_str(
            r#"{"preferences": {"convenience_importance": 0.9}, "candidates": [{"id": 4}]}"#,
        )
        .unwrap();
        let query: GetRecommendationsQuery = request.into();

        assert_eq!(query.preferences.mode(), "legacy");
        assert_eq!(query.candidates, vec![Candidate::new(4)]);
        assert_eq!(query.limit, None);
    }

    #[test]
    fn test_request_accepts_tagged_preferences() {
        let request: RecommendationRequest = serde_json::from_str(
            r#"{"preferences": {"mode": "direct", "view_importance": 1.0}, "limit": 5}"#,
        )
        .unwrap();
        let query: GetRecommendationsQuery = request.into();

        assert_eq!(query.preferences.mode(), "direct");
        assert!(query.candidates.is_empty());
        assert_eq!(query.limit, Some(5));
    }
}
