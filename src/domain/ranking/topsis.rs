//! TOPSIS Ranker - orders alternatives by relative closeness to the ideal.
//!
//! Pure computation over a [`DecisionMatrix`] and an [`EvaluationPlan`]:
//!
//! 1. Vector-normalize each column (a zero norm is treated as 1)
//! 2. Multiply each column by its weight
//! 3. Take the ideal best and worst per column according to polarity
//! 4. Measure Euclidean distance of each row to both ideals
//! 5. Score = d_worst / (d_best + d_worst), with a zero denominator treated as 1
//! 6. Sort by score descending and assign 1-based ranks

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{DecisionMatrix, EvaluationPlan, RankingError};
use crate::domain::catalog::Polarity;
use crate::domain::foundation::{AlternativeId, CriterionCode};

/// One ranked alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub rank: usize,
    pub alternative_id: AlternativeId,
    /// Relative closeness in [0, 1]; higher is better.
    pub score: f64,
    pub distance_to_best: f64,
    pub distance_to_worst: f64,
    /// Normalized, weighted value per criterion.
    pub weighted_values: BTreeMap<CriterionCode, f64>,
    pub explanation: String,
}

/// Per-column ideal best and ideal worst of a weighted matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealSolutions {
    pub best: Vec<f64>,
    pub worst: Vec<f64>,
}

/// Stateless TOPSIS ranker.
pub struct TopsisRanker;

impl TopsisRanker {
    /// Ranks every alternative of the matrix.
    ///
    /// Results come back best first. Alternatives with equal scores keep
    /// their matrix row order. Explanations are left empty.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::ColumnMismatch`] when the matrix columns are
    /// not exactly the plan's criteria in the plan's order.
    pub fn rank(
        matrix: &DecisionMatrix,
        plan: &EvaluationPlan,
    ) -> Result<Vec<RankedResult>, RankingError> {
        if matrix.is_empty() {
            return Ok(Vec::new());
        }

        let expected = plan.codes();
        if matrix.criteria() != expected.as_slice() {
            return Err(RankingError::ColumnMismatch {
                expected,
                actual: matrix.criteria().to_vec(),
            });
        }

        let weighted = Self::weigh(&Self::normalize(matrix), &plan.weights());
        let ideals = Self::ideal_solutions(&weighted, &plan.polarities());

        let mut results: Vec<RankedResult> = weighted
            .rows()
            .zip(weighted.alternatives())
            .map(|(row, &alternative_id)| {
                let distance_to_best = euclidean(row, &ideals.best);
                let distance_to_worst = euclidean(row, &ideals.worst);
                RankedResult {
                    rank: 0,
                    alternative_id,
                    score: closeness(distance_to_best, distance_to_worst),
                    distance_to_best,
                    distance_to_worst,
                    weighted_values: weighted
                        .criteria()
                        .iter()
                        .cloned()
                        .zip(row.iter().copied())
                        .collect(),
                    explanation: String::new(),
                }
            })
            .collect();

        // Vec::sort_by is stable.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        for (position, result) in results.iter_mut().enumerate() {
            result.rank = position + 1;
        }

        Ok(results)
    }

    /// Divides each column by its Euclidean norm.
    pub fn normalize(matrix: &DecisionMatrix) -> DecisionMatrix {
        let norms: Vec<f64> = (0..matrix.criterion_count())
            .map(|col| {
                let norm = matrix.column(col).map(|v| v * v).sum::<f64>().sqrt();
                if norm == 0.0 {
                    1.0
                } else {
                    norm
                }
            })
            .collect();

        let values = matrix
            .rows()
            .flat_map(|row| row.iter().zip(&norms).map(|(v, norm)| v / norm))
            .collect();
        matrix.with_values(values)
    }

    /// Multiplies each column by its weight.
    pub fn weigh(matrix: &DecisionMatrix, weights: &[f64]) -> DecisionMatrix {
        let values = matrix
            .rows()
            .flat_map(|row| row.iter().zip(weights).map(|(v, w)| v * w))
            .collect();
        matrix.with_values(values)
    }

    /// Benefit columns: best is the max, worst the min. Cost columns: reversed.
    pub fn ideal_solutions(matrix: &DecisionMatrix, polarities: &[Polarity]) -> IdealSolutions {
        let mut best = Vec::with_capacity(polarities.len());
        let mut worst = Vec::with_capacity(polarities.len());

        for (col, polarity) in polarities.iter().enumerate() {
            let max = matrix.column(col).fold(f64::NEG_INFINITY, f64::max);
            let min = matrix.column(col).fold(f64::INFINITY, f64::min);
            match polarity {
                Polarity::Benefit => {
                    best.push(max);
                    worst.push(min);
                }
                Polarity::Cost => {
                    best.push(min);
                    worst.push(max);
                }
            }
        }

        IdealSolutions { best, worst }
    }
}

fn euclidean(row: &[f64], ideal: &[f64]) -> f64 {
    row.iter()
        .zip(ideal)
        .map(|(v, i)| (v - i) * (v - i))
        .sum::<f64>()
        .sqrt()
}

fn closeness(distance_to_best: f64, distance_to_worst: f64) -> f64 {
    let denominator = distance_to_best + distance_to_worst;
    if denominator == 0.0 {
        distance_to_worst
    } else {
        distance_to_worst / denominator
    }
}
