//! In-memory reference data readers.

use async_trait::async_trait;

use super::seed;
use crate::domain::catalog::{Criterion, CriterionCatalog, InfluenceEdge, InfluenceGraph, InfluenceNode};
use crate::ports::{CriterionCatalogReader, DataSourceError, InfluenceGraphReader};

/// Catalog reader over a fixed list of criteria.
///
/// The catalog is validated on every load, the same way a database-backed
/// reader validates fresh rows.
#[derive(Debug, Clone)]
pub struct InMemoryCatalogReader {
    criteria: Vec<Criterion>,
}

impl InMemoryCatalogReader {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }

    /// Reader over the StayHub seed criteria.
    pub fn seeded() -> Self {
        Self::new(seed::stayhub_criteria())
    }
}

#[async_trait]
impl CriterionCatalogReader for InMemoryCatalogReader {
    async fn load_catalog(&self) -> Result<CriterionCatalog, DataSourceError> {
        Ok(CriterionCatalog::new(self.criteria.clone())?)
    }
}

/// Influence graph reader over fixed nodes and edges.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInfluenceGraphReader {
    nodes: Vec<InfluenceNode>,
    edges: Vec<InfluenceEdge>,
}

impl InMemoryInfluenceGraphReader {
    pub fn new(nodes: Vec<InfluenceNode>, edges: Vec<InfluenceEdge>) -> Self {
        Self { nodes, edges }
    }

    /// Reader over the default StayHub influence diagram.
    pub fn seeded() -> Self {
        Self::new(seed::default_influence_nodes(), seed::default_influence_edges())
    }
}

#[async_trait]
impl InfluenceGraphReader for InMemoryInfluenceGraphReader {
    async fn load_graph(&self) -> Result<InfluenceGraph, DataSourceError> {
        Ok(InfluenceGraph::build(self.nodes.clone(), self.edges.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CatalogError, NodeKind, Polarity};

    #[tokio::test]
    async fn seeded_catalog_loads() {
        let catalog = InMemoryCatalogReader::seeded().load_catalog().await.unwrap();
        assert_eq!(catalog.active_criteria().count(), 8);
    }

    #[tokio::test]
    async fn duplicate_criteria_are_reported_as_invalid_reference_data() {
        let reader = InMemoryCatalogReader::new(vec![
            Criterion::new("PRICE", "Price", Polarity::Cost, 1),
            Criterion::new("PRICE", "Price again", Polarity::Cost, 2),
        ]);

        let err = reader.load_catalog().await.unwrap_err();
        assert!(matches!(
            err,
            DataSourceError::InvalidReferenceData(CatalogError::DuplicateCriterion(_))
        ));
    }

    #[tokio::test]
    async fn seeded_graph_loads() {
        let graph = InMemoryInfluenceGraphReader::seeded().load_graph().await.unwrap();
        assert_eq!(graph.node_count(), 11);
    }

    #[tokio::test]
    async fn cyclic_graph_is_rejected() {
        let reader = InMemoryInfluenceGraphReader::new(
            vec![
                InfluenceNode::new("A", NodeKind::Intermediate, 1),
                InfluenceNode::new("B", NodeKind::Intermediate, 2),
            ],
            vec![InfluenceEdge::new("A", "B", 1.0), InfluenceEdge::new("B", "A", 1.0)],
        );

        let err = reader.load_graph().await.unwrap_err();
        assert!(matches!(err, DataSourceError::InvalidReferenceData(CatalogError::Cycle(_))));
    }
}
