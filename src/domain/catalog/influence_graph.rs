//! Influence Graph - weighted DAG from preference factors to criteria.
//!
//! Nodes and edges live in flat arenas and refer to each other by index.
//! The graph is reference data: it is built once per computation and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use super::CatalogError;
use crate::domain::foundation::CriterionCode;

/// Role of a node in the influence diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Top-level user preference.
    Root,
    /// Intermediate factor (convenience, comfort, value).
    Intermediate,
    /// Leaf standing for a concrete criterion.
    Leaf,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Root => "root",
            NodeKind::Intermediate => "intermediate",
            NodeKind::Leaf => "leaf",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for NodeKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "root" => Ok(NodeKind::Root),
            "intermediate" => Ok(NodeKind::Intermediate),
            "leaf" => Ok(NodeKind::Leaf),
            other => Err(CatalogError::UnknownNodeKind(other.to_string())),
        }
    }
}

/// A node row of the influence diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceNode {
    pub code: String,
    pub kind: NodeKind,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub display_order: i32,
}

impl InfluenceNode {
    pub fn new(code: impl Into<String>, kind: NodeKind, display_order: i32) -> Self {
        Self {
            code: code.into(),
            kind,
            active: true,
            display_order,
        }
    }

    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }
}

/// An edge row of the influence diagram.
///
/// `mapped_criterion` is present only on edges that terminate at a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceEdge {
    pub parent_code: String,
    pub child_code: String,
    pub weight_factor: f64,
    #[serde(default)]
    pub mapped_criterion: Option<CriterionCode>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl InfluenceEdge {
    /// Creates an edge that propagates through an intermediate node.
    pub fn new(
        parent_code: impl Into<String>,
        child_code: impl Into<String>,
        weight_factor: f64,
    ) -> Self {
        Self {
            parent_code: parent_code.into(),
            child_code: child_code.into(),
            weight_factor,
            mapped_criterion: None,
            active: true,
        }
    }

    /// Creates an edge terminating at a leaf mapped to a criterion.
    pub fn mapped(
        parent_code: impl Into<String>,
        child_code: impl Into<String>,
        weight_factor: f64,
        criterion: impl Into<CriterionCode>,
    ) -> Self {
        Self {
            mapped_criterion: Some(criterion.into()),
            ..Self::new(parent_code, child_code, weight_factor)
        }
    }

    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone)]
struct Edge {
    child: usize,
    weight_factor: f64,
    mapped_criterion: Option<CriterionCode>,
}

/// Borrowed view of an outgoing edge.
#[derive(Debug, Clone, Copy)]
pub struct OutgoingEdge<'g> {
    pub child: &'g InfluenceNode,
    pub weight_factor: f64,
    pub mapped_criterion: Option<&'g CriterionCode>,
}

/// Read-only influence diagram over active nodes and edges.
#[derive(Debug, Clone, Default)]
pub struct InfluenceGraph {
    nodes: Vec<InfluenceNode>,
    edges: Vec<Edge>,
    index: HashMap<String, usize>,
    outgoing: Vec<Vec<usize>>,
}

impl InfluenceGraph {
    /// Builds the graph from catalog rows.
    ///
    /// Inactive nodes are dropped together with every edge touching them, and
    /// inactive edges are dropped without being checked. Fails on duplicate
    /// node codes, active edges naming nodes that do not exist at all, negative
    /// or non-finite weight factors on kept edges, and cycles.
    pub fn build(
        nodes: Vec<InfluenceNode>,
        edges: Vec<InfluenceEdge>,
    ) -> Result<Self, CatalogError> {
        let mut known = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !known.insert(node.code.clone()) {
                return Err(CatalogError::DuplicateNode(node.code.clone()));
            }
        }

        let mut nodes: Vec<InfluenceNode> = nodes.into_iter().filter(|n| n.active).collect();
        nodes.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.code.cmp(&b.code))
        });
        let index: HashMap<String, usize> = nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.code.clone(), position))
            .collect();

        let mut graph_edges = Vec::with_capacity(edges.len());
        let mut outgoing = vec![Vec::new(); nodes.len()];
        for edge in edges {
            if !edge.active {
                continue;
            }
            for code in [&edge.parent_code, &edge.child_code] {
                if !known.contains(code) {
                    return Err(CatalogError::UnknownNode {
                        parent: edge.parent_code.clone(),
                        child: edge.child_code.clone(),
                        missing: code.clone(),
                    });
                }
            }
            let (Some(&parent), Some(&child)) =
                (index.get(&edge.parent_code), index.get(&edge.child_code))
            else {
                // One endpoint is inactive.
                continue;
            };
            if !edge.weight_factor.is_finite() || edge.weight_factor < 0.0 {
                return Err(CatalogError::InvalidWeightFactor {
                    parent: edge.parent_code,
                    child: edge.child_code,
                    value: edge.weight_factor,
                });
            }
            outgoing[parent].push(graph_edges.len());
            graph_edges.push(Edge {
                child,
                weight_factor: edge.weight_factor,
                mapped_criterion: edge.mapped_criterion,
            });
        }

        let graph = Self {
            nodes,
            edges: graph_edges,
            index,
            outgoing,
        };
        graph.ensure_acyclic()?;
        Ok(graph)
    }

    /// Kahn's algorithm; any node left with incoming edges sits on a cycle.
    fn ensure_acyclic(&self) -> Result<(), CatalogError> {
        let mut in_degree = vec![0usize; self.nodes.len()];
        for edge in &self.edges {
            in_degree[edge.child] += 1;
        }

        let mut ready: VecDeque<usize> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(node, _)| node)
            .collect();
        let mut visited = 0;
        while let Some(node) = ready.pop_front() {
            visited += 1;
            for &edge in &self.outgoing[node] {
                let child = self.edges[edge].child;
                in_degree[child] -= 1;
                if in_degree[child] == 0 {
                    ready.push_back(child);
                }
            }
        }

        if visited == self.nodes.len() {
            return Ok(());
        }
        let on_cycle = in_degree
            .iter()
            .position(|&degree| degree > 0)
            .map(|node| self.nodes[node].code.clone())
            .unwrap_or_default();
        Err(CatalogError::Cycle(on_cycle))
    }

    /// Looks up an active node by code.
    pub fn node(&self, code: &str) -> Option<&InfluenceNode> {
        self.index.get(code).map(|&position| &self.nodes[position])
    }

    /// Active nodes in display order.
    pub fn nodes(&self) -> &[InfluenceNode] {
        &self.nodes
    }

    /// Active outgoing edges of the node with the given code.
    ///
    /// Unknown or inactive codes yield no edges.
    pub fn outgoing<'g>(&'g self, code: &str) -> impl Iterator<Item = OutgoingEdge<'g>> + 'g {
        let edges: &'g [usize] = self
            .index
            .get(code)
            .map(|&position| self.outgoing[position].as_slice())
            .unwrap_or(&[]);
        edges.iter().map(move |&edge| {
            let edge = &self.edges[edge];
            OutgoingEdge {
                child: &self.nodes[edge.child],
                weight_factor: edge.weight_factor,
                mapped_criterion: edge.mapped_criterion.as_ref(),
            }
        })
    }

    /// Criteria reachable through a mapped edge directly out of `code`.
    pub fn mapped_criteria(&self, code: &str) -> BTreeSet<CriterionCode> {
        self.outgoing(code)
            .filter_map(|edge| edge.mapped_criterion.cloned())
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
