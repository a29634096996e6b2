//! Decision Matrix - alternatives × criteria table of raw attribute values.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use super::RankingError;
use crate::domain::foundation::{AlternativeId, CriterionCode};

/// One stored attribute value of an alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub alternative_id: AlternativeId,
    pub criterion_code: CriterionCode,
    pub value: f64,
}

impl AttributeValue {
    pub fn new(
        alternative_id: impl Into<AlternativeId>,
        criterion_code: impl Into<CriterionCode>,
        value: f64,
    ) -> Self {
        Self {
            alternative_id: alternative_id.into(),
            criterion_code: criterion_code.into(),
            value,
        }
    }
}

/// Rectangular table of finite values, stored row-major.
///
/// Row order (alternatives) and column order (criteria) are fixed at
/// construction; every matrix derived from it keeps the same order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionMatrix {
    alternatives: Vec<AlternativeId>,
    criteria: Vec<CriterionCode>,
    values: Vec<f64>,
}

impl DecisionMatrix {
    /// Creates a matrix with no alternatives over the given criteria.
    pub fn empty(criteria: Vec<CriterionCode>) -> Self {
        Self {
            alternatives: Vec::new(),
            criteria,
            values: Vec::new(),
        }
    }

    /// Creates a matrix from explicit rows.
    ///
    /// # Errors
    /// - A row whose length differs from the number of criteria
    /// - A NaN or infinite value
    pub fn new(
        alternatives: Vec<AlternativeId>,
        criteria: Vec<CriterionCode>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, RankingError> {
        if rows.len() != alternatives.len() {
            return Err(RankingError::RowCountMismatch {
                alternatives: alternatives.len(),
                rows: rows.len(),
            });
        }

        let mut values = Vec::with_capacity(rows.len() * criteria.len());
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != criteria.len() {
                return Err(RankingError::RaggedRow {
                    row,
                    expected: criteria.len(),
                    actual: cells.len(),
                });
            }
            for (col, value) in cells.into_iter().enumerate() {
                if !value.is_finite() {
                    return Err(RankingError::NonFiniteValue {
                        alternative_id: alternatives[row],
                        criterion_code: criteria[col].clone(),
                    });
                }
                values.push(value);
            }
        }

        Ok(Self {
            alternatives,
            criteria,
            values,
        })
    }

    /// Creates a builder for the given column order.
    pub fn builder(criteria: Vec<CriterionCode>) -> DecisionMatrixBuilder {
        DecisionMatrixBuilder::new(criteria)
    }

    /// Assembles a matrix from stored attribute values.
    ///
    /// Only values for the requested alternatives and criteria are used.
    /// Alternatives without any stored value are left out; remaining gaps
    /// default to 0.0. Rows are ordered by ascending alternative id.
    pub fn from_attributes(
        alternatives: &[AlternativeId],
        criteria: &[CriterionCode],
        attributes: impl IntoIterator<Item = AttributeValue>,
    ) -> Self {
        let requested: BTreeSet<AlternativeId> = alternatives.iter().copied().collect();
        let mut builder = DecisionMatrixBuilder::new(criteria.to_vec());
        for attribute in attributes {
            if requested.contains(&attribute.alternative_id) {
                builder = builder.value(
                    attribute.alternative_id,
                    attribute.criterion_code,
                    attribute.value,
                );
            }
        }

        let matrix = builder.build();
        let omitted = requested.len() - matrix.alternative_count();
        if omitted > 0 {
            debug!(omitted, "Alternatives without attribute values left out of matrix");
        }
        matrix
    }

    /// Returns a matrix with the same rows and columns but new values.
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.values.len());
        Self {
            alternatives: self.alternatives.clone(),
            criteria: self.criteria.clone(),
            values,
        }
    }

    pub fn alternatives(&self) -> &[AlternativeId] {
        &self.alternatives
    }

    pub fn criteria(&self) -> &[CriterionCode] {
        &self.criteria
    }

    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    /// Returns true if the matrix has no alternatives.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.criteria.len() + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let width = self.criteria.len();
        &self.values[row * width..(row + 1) * width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.alternatives.len()).map(move |row| self.row(row))
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows().map(move |row| row[col])
    }

    /// Arithmetic mean of a column; 0.0 for an empty matrix.
    pub fn column_mean(&self, col: usize) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.column(col).sum::<f64>() / self.alternatives.len() as f64
    }

    pub fn column_index(&self, code: &str) -> Option<usize> {
        self.criteria.iter().position(|c| c.as_str() == code)
    }

    pub fn row_index(&self, alternative_id: AlternativeId) -> Option<usize> {
        self.alternatives.iter().position(|&a| a == alternative_id)
    }
}

/// Builder collecting sparse values into a dense [`DecisionMatrix`].
#[derive(Debug, Default)]
pub struct DecisionMatrixBuilder {
    criteria: Vec<CriterionCode>,
    cells: BTreeMap<AlternativeId, HashMap<CriterionCode, f64>>,
}

impl DecisionMatrixBuilder {
    pub fn new(criteria: Vec<CriterionCode>) -> Self {
        Self {
            criteria,
            cells: BTreeMap::new(),
        }
    }

    /// Registers an alternative even if it never receives a value.
    pub fn alternative(mut self, alternative_id: impl Into<AlternativeId>) -> Self {
        self.cells.entry(alternative_id.into()).or_default();
        self
    }

    /// Sets one value. Codes outside the column set and non-finite values are
    /// ignored and do not register the alternative.
    pub fn value(
        mut self,
        alternative_id: impl Into<AlternativeId>,
        criterion_code: impl Into<CriterionCode>,
        value: f64,
    ) -> Self {
        let criterion_code = criterion_code.into();
        if value.is_finite() && self.criteria.contains(&criterion_code) {
            self.cells
                .entry(alternative_id.into())
                .or_default()
                .insert(criterion_code, value);
        }
        self
    }

    /// Builds the matrix, defaulting missing cells to 0.0.
    pub fn build(self) -> DecisionMatrix {
        let mut defaulted = 0usize;
        let mut values = Vec::with_capacity(self.cells.len() * self.criteria.len());
        for row in self.cells.values() {
            for code in &self.criteria {
                match row.get(code) {
                    Some(&value) => values.push(value),
                    None => {
                        defaulted += 1;
                        values.push(0.0);
                    }
                }
            }
        }

        if defaulted > 0 {
            debug!(defaulted, "Missing attribute values defaulted to 0.0");
        }

        DecisionMatrix {
            alternatives: self.cells.into_keys().collect(),
            criteria: self.criteria,
            values,
        }
    }
}
