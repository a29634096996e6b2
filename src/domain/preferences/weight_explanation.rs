//! Human-readable breakdown of resolved weights.

use serde::{Deserialize, Serialize};

use super::WeightVector;
use crate::domain::catalog::CriterionCatalog;
use crate::domain::foundation::CriterionCode;

/// One criterion's share of the total weight, with catalog metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightExplanation {
    pub criterion_code: CriterionCode,
    pub criterion_name: String,
    pub weight: f64,
    pub weight_percent: f64,
    pub description: Option<String>,
    pub unit: Option<String>,
}

/// Explains each weighted criterion, heaviest first.
///
/// Criteria missing from the catalog are left out.
pub fn explain_weights(weights: &WeightVector, catalog: &CriterionCatalog) -> Vec<WeightExplanation> {
    weights
        .ranked()
        .into_iter()
        .filter_map(|(code, weight)| {
            let criterion = catalog.get(code.as_str())?;
            Some(WeightExplanation {
                criterion_code: code.clone(),
                criterion_name: criterion.name.clone(),
                weight,
                weight_percent: weight * 100.0,
                description: criterion.description.clone(),
                unit: criterion.unit.clone(),
            })
        })
        .collect()
}
