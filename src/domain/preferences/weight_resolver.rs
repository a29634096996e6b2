//! Preference Weight Resolver - turns preference scalars into criterion weights.

use std::collections::BTreeMap;
use tracing::{debug, trace};

use super::{DirectPreferences, LegacyPreferences, Preferences, WeightVector};
use crate::domain::catalog::InfluenceGraph;
use crate::domain::foundation::CriterionCode;

/// Intermediate influence nodes fed by legacy preferences.
pub const CONVENIENCE_NODE: &str = "CONVENIENCE";
pub const COMFORT_NODE: &str = "COMFORT";
pub const VALUE_NODE: &str = "VALUE";

// Direct-mode coefficients: the share of a preference scalar credited to a criterion.
const OVERALL_RATING_PER_COMFORT: f64 = 0.4;
const AMENITIES_PER_COMFORT: f64 = 0.3;
const CENTER_DISTANCE_PER_DISTANCE_TOLERANCE: f64 = 0.3;

/// Resolves user preferences into a normalized [`WeightVector`].
///
/// Holds a borrowed influence graph snapshot and never mutates it, so one
/// resolver can serve any number of independent requests.
pub struct WeightResolver<'g> {
    graph: &'g InfluenceGraph,
}

impl<'g> WeightResolver<'g> {
    pub fn new(graph: &'g InfluenceGraph) -> Self {
        Self { graph }
    }

    /// Resolves preferences into criterion weights.
    ///
    /// # Edge Cases
    /// - Zero total contribution: uniform weights over the candidate criteria
    /// - Legacy mode with no mapped edges: empty vector
    pub fn resolve(&self, preferences: &Preferences) -> WeightVector {
        let raw = match preferences {
            Preferences::Direct(direct) => Self::direct_contributions(direct),
            Preferences::Legacy(legacy) => self.propagate(legacy),
        };
        let weights = WeightVector::normalize(raw);

        debug!(
            mode = preferences.mode(),
            criteria = weights.len(),
            "Resolved criterion weights"
        );
        weights
    }

    /// Fixed linear combination of the direct preference scalars.
    fn direct_contributions(p: &DirectPreferences) -> BTreeMap<CriterionCode, f64> {
        [
            (CriterionCode::PRICE, p.price_sensitivity),
            (
                CriterionCode::RATING_OVERALL,
                p.comfort_priority * OVERALL_RATING_PER_COMFORT,
            ),
            (CriterionCode::RATING_CLEANLINESS, p.cleanliness_priority),
            (CriterionCode::RATING_LOCATION, p.distance_tolerance),
            (
                CriterionCode::DISTANCE_CENTER,
                p.distance_tolerance * CENTER_DISTANCE_PER_DISTANCE_TOLERANCE,
            ),
            (
                CriterionCode::AMENITIES_COUNT,
                p.comfort_priority * AMENITIES_PER_COMFORT,
            ),
            (CriterionCode::VIEW_QUALITY, p.view_importance),
        ]
        .into_iter()
        .map(|(code, value)| (CriterionCode::from(code), value))
        .collect()
    }

    /// One level of propagation: intermediate node weight × edge weight factor.
    ///
    /// Contributions reaching the same criterion through several paths are
    /// summed. Edges without a mapped criterion are not followed further.
    fn propagate(&self, p: &LegacyPreferences) -> BTreeMap<CriterionCode, f64> {
        let mut intermediate = [
            (CONVENIENCE_NODE, p.convenience_importance),
            (COMFORT_NODE, p.comfort_importance),
            (VALUE_NODE, p.value_importance),
        ];
        let total: f64 = intermediate.iter().map(|(_, weight)| weight).sum();
        if total > 0.0 {
            for (_, weight) in intermediate.iter_mut() {
                *weight /= total;
            }
        }

        let mut raw: BTreeMap<CriterionCode, f64> = BTreeMap::new();
        for (node, node_weight) in intermediate {
            for edge in self.graph.outgoing(node) {
                let Some(criterion) = edge.mapped_criterion else {
                    trace!(from = node, to = %edge.child.code, "Skipping unmapped influence edge");
                    continue;
                };
                *raw.entry(criterion.clone()).or_insert(0.0) += node_weight * edge.weight_factor;
            }
        }
        raw
    }
}
