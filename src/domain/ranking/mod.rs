//! Ranking Module - Multi-criteria ranking of alternatives.
//!
//! # Components
//!
//! - `DecisionMatrix` - Alternatives × criteria table of raw values
//! - `EvaluationPlan` - Weighted criteria with polarity, in catalog order
//! - `TopsisRanker` - Closeness-to-ideal scoring and ranking
//! - `Explainer` - Strength and trade-off phrases per ranked alternative
//!
//! Everything here is pure computation. Identical inputs give identical
//! output, including order.

mod decision_matrix;
mod evaluation_plan;
mod explanation;
mod topsis;

pub use decision_matrix::{AttributeValue, DecisionMatrix, DecisionMatrixBuilder};
pub use evaluation_plan::{EvaluationColumn, EvaluationPlan};
pub use explanation::{proximity_note, Explainer, EXPLAINED_CRITERIA};
pub use topsis::{IdealSolutions, RankedResult, TopsisRanker};

use thiserror::Error;

use crate::domain::foundation::{AlternativeId, CriterionCode, DomainError, ErrorCode};

/// Errors raised by matrix construction and ranking.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingError {
    #[error("Matrix columns {actual:?} do not match evaluated criteria {expected:?}")]
    ColumnMismatch {
        expected: Vec<CriterionCode>,
        actual: Vec<CriterionCode>,
    },

    #[error("Row {row} has {actual} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Matrix has {alternatives} alternatives but {rows} rows")]
    RowCountMismatch { alternatives: usize, rows: usize },

    #[error("Value for alternative {alternative_id}, criterion {criterion_code} is not finite")]
    NonFiniteValue {
        alternative_id: AlternativeId,
        criterion_code: CriterionCode,
    },
}

impl From<RankingError> for DomainError {
    fn from(err: RankingError) -> Self {
        let code = match err {
            RankingError::ColumnMismatch { .. } => ErrorCode::ColumnMismatch,
            _ => ErrorCode::InternalError,
        };
        DomainError::new(code, err.to_string())
    }
}
