//! WeightVector - normalized per-criterion importance weights.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::CriterionCode;

/// Non-negative weights keyed by criterion code.
///
/// Built only through [`WeightVector::normalize`], so the weights sum to 1.0
/// whenever any raw contribution was positive, and are uniform otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector {
    weights: BTreeMap<CriterionCode, f64>,
}

impl WeightVector {
    /// Normalizes raw contributions over the given candidate criteria.
    ///
    /// Every key of `raw` is a candidate criterion. Negative or non-finite
    /// contributions count as zero. If the total is not positive the result
    /// is a uniform distribution over all candidates.
    pub fn normalize(raw: BTreeMap<CriterionCode, f64>) -> Self {
        let raw: BTreeMap<CriterionCode, f64> = raw
            .into_iter()
            .map(|(code, value)| {
                let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
                (code, value)
            })
            .collect();

        let total: f64 = raw.values().sum();
        if total > 0.0 {
            let weights = raw
                .into_iter()
                .map(|(code, value)| (code, value / total))
                .collect();
            return Self { weights };
        }

        let uniform = 1.0 / raw.len().max(1) as f64;
        let weights = raw.into_keys().map(|code| (code, uniform)).collect();
        Self { weights }
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.weights.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.weights.contains_key(code)
    }

    /// Iterates weights in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&CriterionCode, f64)> {
        self.weights.iter().map(|(code, weight)| (code, *weight))
    }

    pub fn codes(&self) -> impl Iterator<Item = &CriterionCode> {
        self.weights.keys()
    }

    /// Weights sorted by descending weight, ties by code.
    pub fn ranked(&self) -> Vec<(&CriterionCode, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|(code_a, a), (code_b, b)| b.total_cmp(a).then_with(|| code_a.cmp(code_b)));
        ranked
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw(pairs: &[(&str, f64)]) -> BTreeMap<CriterionCode, f64> {
        pairs.iter().map(|(c, v)| (CriterionCode::from(*c), *v)).collect()
    }

    #[test]
    fn normalizes_to_unit_sum() {
        let weights = WeightVector::normalize(raw(&[("PRICE", 2.0), ("RATING_OVERALL", 6.0)]));
        assert_eq!(weights.get("PRICE"), Some(0.25));
        assert_eq!(weights.get("RATING_OVERALL"), Some(0.75));
        assert!((weights.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_total_falls_back_to_uniform() {
        let weights = WeightVector::normalize(raw(&[
            ("PRICE", 0.0),
            ("RATING_OVERALL", 0.0),
            ("VIEW_QUALITY", 0.0),
            ("AMENITIES_COUNT", 0.0),
        ]));
        for (_, weight) in weights.iter() {
            assert_eq!(weight, 0.25);
        }
    }

    #[test]
    fn empty_input_stays_empty() {
        let weights = WeightVector::normalize(BTreeMap::new());
        assert!(weights.is_empty());
        assert_eq!(weights.total(), 0.0);
    }

    #[test]
    fn negative_contributions_count_as_zero() {
        let weights = WeightVector::normalize(raw(&[("PRICE", -1.0), ("RATING_OVERALL", 1.0)]));
        assert_eq!(weights.get("PRICE"), Some(0.0));
        assert_eq!(weights.get("RATING_OVERALL"), Some(1.0));
    }

    #[test]
    fn ranked_orders_by_descending_weight_then_code() {
        let weights = WeightVector::normalize(raw(&[
            ("B", 1.0),
            ("A", 1.0),
            ("C", 2.0),
        ]));
        let order: Vec<&str> = weights.ranked().into_iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }

    proptest! {
        #[test]
        fn weights_always_sum_to_one(values in prop::collection::vec(0.0_f64..10.0, 1..12)) {
            let raw: BTreeMap<CriterionCode, f64> = values
                .iter()
                .enumerate()
                .map(|(i, v)| (CriterionCode::from(format!("C{i}").as_str()), *v))
                .collect();
            let weights = WeightVector::normalize(raw);
            prop_assert!((weights.total() - 1.0).abs() < 1e-6);
            prop_assert!(weights.iter().all(|(_, w)| w >= 0.0));
        }
    }
}
