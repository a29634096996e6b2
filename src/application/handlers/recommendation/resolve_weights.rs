//! ResolveWeightsHandler - Query handler for the weight resolution step alone.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::RecommendationError;
use crate::domain::preferences::{explain_weights, Preferences, WeightExplanation, WeightResolver, WeightVector};
use crate::ports::{CriterionCatalogReader, InfluenceGraphReader};

/// Query to resolve preferences into criterion weights.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveWeightsQuery {
    pub preferences: Preferences,
}

/// Resolved weights with their per-criterion breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveWeightsResult {
    pub computed_weights: WeightVector,
    pub weight_explanations: Vec<WeightExplanation>,
}

/// Handler for resolving weights without ranking anything.
pub struct ResolveWeightsHandler {
    catalog_reader: Arc<dyn CriterionCatalogReader>,
    graph_reader: Arc<dyn InfluenceGraphReader>,
}

impl ResolveWeightsHandler {
    pub fn new(
        catalog_reader: Arc<dyn CriterionCatalogReader>,
        graph_reader: Arc<dyn InfluenceGraphReader>,
    ) -> Self {
        Self {
            catalog_reader,
            graph_reader,
        }
    }

    pub async fn handle(
        &self,
        query: ResolveWeightsQuery,
    ) -> Result<ResolveWeightsResult, RecommendationError> {
        query.preferences.validate()?;

        let (catalog, graph) = tokio::try_join!(
            self.catalog_reader.load_catalog(),
            self.graph_reader.load_graph()
        )?;

        let computed_weights = WeightResolver::new(&graph).resolve(&query.preferences);
        let weight_explanations = explain_weights(&computed_weights, &catalog);

        Ok(ResolveWeightsResult {
            computed_weights,
            weight_explanations,
        })
    }
}
