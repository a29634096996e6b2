//! Influence graph reader port.

use async_trait::async_trait;

use super::DataSourceError;
use crate::domain::catalog::InfluenceGraph;

/// Read-only port for the influence graph.
///
/// Implementations return an already validated graph: inactive nodes and
/// edges removed, every edge endpoint known, and no cycles.
#[async_trait]
pub trait InfluenceGraphReader: Send + Sync {
    async fn load_graph(&self) -> Result<InfluenceGraph, DataSourceError>;
}
