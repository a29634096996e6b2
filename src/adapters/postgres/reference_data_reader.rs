//! PostgreSQL implementation of the reference data reader ports.
//!
//! Reads the `criteria`, `influence_nodes` and `influence_edges` tables.
//! Inactive rows are loaded too; the domain snapshots decide what to keep.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashSet;
use tracing::debug;

use crate::domain::catalog::{
    Criterion, CriterionCatalog, InfluenceEdge, InfluenceGraph, InfluenceNode, NodeKind,
};
use crate::domain::foundation::CriterionCode;
use crate::ports::{CriterionCatalogReader, DataSourceError, InfluenceGraphReader};

/// PostgreSQL reader for the criterion catalog and influence graph.
pub struct PostgresReferenceDataReader {
    pool: PgPool,
}

impl PostgresReferenceDataReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CriterionRow {
    code: String,
    name: String,
    unit: Option<String>,
    description: Option<String>,
    is_benefit: bool,
    display_order: i32,
    is_active: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct NodeRow {
    node_code: String,
    node_type: String,
    display_order: i32,
    is_active: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct EdgeRow {
    parent_code: String,
    child_code: String,
    weight_factor: f64,
    criterion_code: Option<String>,
    is_active: bool,
}

impl TryFrom<CriterionRow> for Criterion {
    type Error = DataSourceError;

    fn try_from(row: CriterionRow) -> Result<Self, Self::Error> {
        let code = CriterionCode::new(row.code)
            .map_err(|e| DataSourceError::Database(format!("Invalid criterion code: {}", e)))?;
        Ok(Criterion {
            code,
            name: row.name,
            unit: row.unit,
            description: row.description,
            is_benefit: row.is_benefit,
            display_order: row.display_order,
            active: row.is_active,
        })
    }
}

impl TryFrom<NodeRow> for InfluenceNode {
    type Error = DataSourceError;

    fn try_from(row: NodeRow) -> Result<Self, Self::Error> {
        let kind: NodeKind = row.node_type.parse()?;
        let node = InfluenceNode::new(row.node_code, kind, row.display_order);
        Ok(if row.is_active { node } else { node.deactivated() })
    }
}

impl From<EdgeRow> for InfluenceEdge {
    fn from(row: EdgeRow) -> Self {
        let edge = match row.criterion_code {
            Some(code) => {
                InfluenceEdge::mapped(row.parent_code, row.child_code, row.weight_factor, code.as_str())
            }
            None => InfluenceEdge::new(row.parent_code, row.child_code, row.weight_factor),
        };
        if row.is_active {
            edge
        } else {
            edge.deactivated()
        }
    }
}

/// Converts raw graph rows into domain rows.
///
/// A retired node whose `node_type` does not parse is skipped along with its
/// edges. The same defect on an active node fails the load.
fn graph_rows(
    nodes: Vec<NodeRow>,
    edges: Vec<EdgeRow>,
) -> Result<(Vec<InfluenceNode>, Vec<InfluenceEdge>), DataSourceError> {
    let mut retired = HashSet::new();
    let mut converted = Vec::with_capacity(nodes.len());
    for row in nodes {
        if !row.is_active && row.node_type.parse::<NodeKind>().is_err() {
            debug!(
                node = %row.node_code,
                node_type = %row.node_type,
                "Skipping retired node with unknown kind"
            );
            retired.insert(row.node_code);
            continue;
        }
        converted.push(InfluenceNode::try_from(row)?);
    }

    let edges = edges
        .into_iter()
        .filter(|e| !retired.contains(&e.parent_code) && !retired.contains(&e.child_code))
        .map(InfluenceEdge::from)
        .collect();
    Ok((converted, edges))
}

#[async_trait]
impl CriterionCatalogReader for PostgresReferenceDataReader {
    async fn load_catalog(&self) -> Result<CriterionCatalog, DataSourceError> {
        let rows: Vec<CriterionRow> = sqlx::query_as(
            r#"
            SELECT code, name, unit, description, is_benefit, display_order, is_active
            FROM criteria
            ORDER BY display_order, code
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(rows = rows.len(), "Loaded criteria");
        let criteria = rows
            .into_iter()
            .map(Criterion::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CriterionCatalog::new(criteria)?)
    }
}

#[async_trait]
impl InfluenceGraphReader for PostgresReferenceDataReader {
    async fn load_graph(&self) -> Result<InfluenceGraph, DataSourceError> {
        let nodes: Vec<NodeRow> = sqlx::query_as(
            r#"
            SELECT node_code, node_type, display_order, is_active
            FROM influence_nodes
            ORDER BY display_order, node_code
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let edges: Vec<EdgeRow> = sqlx::query_as(
            r#"
            SELECT
                p.node_code AS parent_code,
                c.node_code AS child_code,
                e.weight_factor::float8 AS weight_factor,
                cr.code AS criterion_code,
                e.is_active
            FROM influence_edges e
            JOIN influence_nodes p ON e.parent_node_id = p.node_id
            JOIN influence_nodes c ON e.child_node_id = c.node_id
            LEFT JOIN criteria cr ON e.criterion_mapping_id = cr.criterion_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(nodes = nodes.len(), edges = edges.len(), "Loaded influence graph rows");
        let (nodes, edges) = graph_rows(nodes, edges)?;
        Ok(InfluenceGraph::build(nodes, edges)?)
    }
}
