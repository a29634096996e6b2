//! Explanation Generator - short natural-language reasons for a ranking.

use std::collections::HashMap;

use super::{DecisionMatrix, EvaluationPlan, RankedResult};
use crate::domain::catalog::Polarity;
use crate::domain::foundation::AlternativeId;

/// Number of heaviest criteria examined per alternative.
pub const EXPLAINED_CRITERIA: usize = 3;

/// Relative distance from the column mean that counts as notable.
const NOTABLE_DEVIATION: f64 = 0.10;

const BALANCED: &str = "Balanced option";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assessment {
    Strength,
    Weakness,
}

/// Builds explanation strings from raw matrix values.
pub struct Explainer;

impl Explainer {
    /// Fills in the explanation of every ranked result.
    ///
    /// Results whose alternative is not in the matrix get the neutral
    /// phrase for their rank.
    pub fn annotate(results: &mut [RankedResult], matrix: &DecisionMatrix, plan: &EvaluationPlan) {
        let rows: HashMap<AlternativeId, usize> = matrix
            .alternatives()
            .iter()
            .enumerate()
            .map(|(row, &id)| (id, row))
            .collect();
        let top: Vec<usize> = plan
            .by_weight()
            .into_iter()
            .take(EXPLAINED_CRITERIA)
            .collect();
        let means: Vec<f64> = top.iter().map(|&col| matrix.column_mean(col)).collect();

        for result in results.iter_mut() {
            let mut strengths = Vec::new();
            let mut weaknesses = Vec::new();

            if let Some(&row) = rows.get(&result.alternative_id) {
                for (&col, &mean) in top.iter().zip(&means) {
                    let column = &plan.columns()[col];
                    match assess(matrix.value(row, col), mean, column.polarity) {
                        Some(Assessment::Strength) => strengths.push(column.name.as_str()),
                        Some(Assessment::Weakness) => weaknesses.push(column.name.as_str()),
                        None => {}
                    }
                }
            }

            result.explanation = Self::compose(result.rank, &strengths, &weaknesses);
        }
    }

    /// Joins the rank phrase, strengths, and trade-offs with ". ".
    ///
    /// Trade-offs are never mentioned for the top-ranked alternative.
    pub fn compose(rank: usize, strengths: &[&str], weaknesses: &[&str]) -> String {
        let mut parts: Vec<String> = Vec::new();

        match rank {
            1 => parts.push("Best overall match".to_string()),
            2..=3 => parts.push("Excellent choice".to_string()),
            4..=10 => parts.push("Good option".to_string()),
            _ => {}
        }

        if !strengths.is_empty() {
            parts.push(format!("Strong in: {}", strengths.join(", ")));
        }

        if rank > 1 && !weaknesses.is_empty() {
            parts.push(format!("Trade-off: {}", weaknesses.join(", ")));
        }

        if parts.is_empty() {
            BALANCED.to_string()
        } else {
            parts.join(". ")
        }
    }
}

fn assess(value: f64, mean: f64, polarity: Polarity) -> Option<Assessment> {
    let above = value > mean * (1.0 + NOTABLE_DEVIATION);
    let below = value < mean * (1.0 - NOTABLE_DEVIATION);
    match (polarity, above, below) {
        (Polarity::Benefit, true, _) | (Polarity::Cost, _, true) => Some(Assessment::Strength),
        (Polarity::Benefit, _, true) | (Polarity::Cost, true, _) => Some(Assessment::Weakness),
        _ => None,
    }
}

/// Suffix describing how far an alternative is from the caller's location.
pub fn proximity_note(distance_km: f64) -> String {
    if distance_km < 1.0 {
        format!(". Very close ({distance_km:.1} km)")
    } else if distance_km < 3.0 {
        format!(". Nearby ({distance_km:.1} km)")
    } else if distance_km < 10.0 {
        format!(". Moderate distance ({distance_km:.1} km)")
    } else {
        format!(". Distance: {distance_km:.1} km")
    }
}
