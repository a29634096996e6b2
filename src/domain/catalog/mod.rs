//! Catalog Module - Read-only reference data for the decision engine.
//!
//! # Components
//!
//! - `CriterionCatalog` - Evaluation criteria with benefit/cost polarity
//! - `InfluenceGraph` - Weighted DAG mapping preference factors to criteria
//!
//! Both are immutable snapshots loaded once per computation. Nothing in the
//! engine caches or mutates them.

mod criterion;
mod influence_graph;

pub use criterion::{Criterion, CriterionCatalog, Polarity};
pub use influence_graph::{InfluenceEdge, InfluenceGraph, InfluenceNode, NodeKind, OutgoingEdge};

use thiserror::Error;

use crate::domain::foundation::{CriterionCode, DomainError, ErrorCode};

/// Errors raised while assembling reference data snapshots.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Duplicate criterion code: {0}")]
    DuplicateCriterion(CriterionCode),

    #[error("Duplicate influence node code: {0}")]
    DuplicateNode(String),

    #[error("Unknown influence node kind: {0}")]
    UnknownNodeKind(String),

    #[error("Edge {parent} -> {child} references unknown node {missing}")]
    UnknownNode {
        parent: String,
        child: String,
        missing: String,
    },

    #[error("Edge {parent} -> {child} has invalid weight factor {value}")]
    InvalidWeightFactor {
        parent: String,
        child: String,
        value: f64,
    },

    #[error("Influence graph contains a cycle through {0}")]
    Cycle(String),
}

impl From<CatalogError> for DomainError {
    fn from(err: CatalogError) -> Self {
        DomainError::new(ErrorCode::InvalidReferenceData, err.to_string())
    }
}
