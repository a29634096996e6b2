//! Evaluation Plan - the weighted, polarity-tagged columns a ranking runs over.

use serde::Serialize;
use tracing::warn;

use crate::domain::catalog::{CriterionCatalog, Polarity};
use crate::domain::foundation::CriterionCode;
use crate::domain::preferences::WeightVector;

/// One criterion taking part in the evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationColumn {
    pub code: CriterionCode,
    pub name: String,
    pub weight: f64,
    pub polarity: Polarity,
}

/// Weighted criteria in catalog display order.
///
/// Weighted codes that are unknown to the catalog or inactive there are
/// dropped and recorded in [`EvaluationPlan::dropped`]. Remaining weights
/// are used as they are, without renormalizing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationPlan {
    columns: Vec<EvaluationColumn>,
    dropped: Vec<CriterionCode>,
}

impl EvaluationPlan {
    pub fn new(weights: &WeightVector, catalog: &CriterionCatalog) -> Self {
        let columns: Vec<EvaluationColumn> = catalog
            .active_criteria()
            .filter_map(|criterion| {
                let weight = weights.get(criterion.code.as_str())?;
                Some(EvaluationColumn {
                    code: criterion.code.clone(),
                    name: criterion.name.clone(),
                    weight,
                    polarity: criterion.polarity(),
                })
            })
            .collect();

        let dropped: Vec<CriterionCode> = weights
            .codes()
            .filter(|code| catalog.active(code.as_str()).is_none())
            .cloned()
            .collect();

        for code in &dropped {
            warn!(
                criterion = %code,
                weight = weights.get(code.as_str()).unwrap_or_default(),
                "Weighted criterion is not an active catalog entry; left out of evaluation"
            );
        }

        Self { columns, dropped }
    }

    pub fn columns(&self) -> &[EvaluationColumn] {
        &self.columns
    }

    pub fn codes(&self) -> Vec<CriterionCode> {
        self.columns.iter().map(|c| c.code.clone()).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.columns.iter().map(|c| c.weight).collect()
    }

    pub fn polarities(&self) -> Vec<Polarity> {
        self.columns.iter().map(|c| c.polarity).collect()
    }

    /// Weighted codes that did not make it into the plan.
    pub fn dropped(&self) -> &[CriterionCode] {
        &self.dropped
    }

    /// Column indices sorted by descending weight; ties keep column order.
    pub fn by_weight(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.columns.len()).collect();
        order.sort_by(|&a, &b| self.columns[b].weight.total_cmp(&self.columns[a].weight));
        order
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
