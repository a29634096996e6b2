//! Criterion catalog - evaluation criteria with benefit/cost polarity.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::CatalogError;
use crate::domain::foundation::CriterionCode;

/// Direction in which a criterion's raw value is preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Higher raw value is preferred (e.g. rating).
    Benefit,
    /// Lower raw value is preferred (e.g. price, distance).
    Cost,
}

impl Polarity {
    /// Maps the catalog's `is_benefit` flag to a polarity.
    pub fn from_is_benefit(is_benefit: bool) -> Self {
        if is_benefit {
            Polarity::Benefit
        } else {
            Polarity::Cost
        }
    }

    pub fn is_benefit(&self) -> bool {
        matches!(self, Polarity::Benefit)
    }
}

/// A single evaluation criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub code: CriterionCode,
    pub name: String,
    pub unit: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub is_benefit: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Criterion {
    /// Creates an active criterion with no unit or description.
    pub fn new(
        code: impl Into<CriterionCode>,
        name: impl Into<String>,
        polarity: Polarity,
        display_order: i32,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            unit: None,
            description: None,
            is_benefit: polarity.is_benefit(),
            display_order,
            active: true,
        }
    }

    /// Sets the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the criterion inactive.
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn polarity(&self) -> Polarity {
        Polarity::from_is_benefit(self.is_benefit)
    }
}

/// Immutable snapshot of the criterion catalog.
///
/// Criteria are kept in display order. Lookups through [`CriterionCatalog::active`]
/// only see active criteria; [`CriterionCatalog::get`] sees all of them.
#[derive(Debug, Clone, Default)]
pub struct CriterionCatalog {
    criteria: Vec<Criterion>,
    index: HashMap<CriterionCode, usize>,
}

impl CriterionCatalog {
    /// Builds a catalog snapshot, rejecting duplicate codes.
    pub fn new(mut criteria: Vec<Criterion>) -> Result<Self, CatalogError> {
        criteria.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.code.cmp(&b.code))
        });

        let mut index = HashMap::with_capacity(criteria.len());
        for (position, criterion) in criteria.iter().enumerate() {
            if index.insert(criterion.code.clone(), position).is_some() {
                return Err(CatalogError::DuplicateCriterion(criterion.code.clone()));
            }
        }

        Ok(Self { criteria, index })
    }

    /// Looks up a criterion regardless of its active flag.
    pub fn get(&self, code: &str) -> Option<&Criterion> {
        self.index.get(code).map(|&position| &self.criteria[position])
    }

    /// Looks up an active criterion.
    pub fn active(&self, code: &str) -> Option<&Criterion> {
        self.get(code).filter(|criterion| criterion.active)
    }

    /// Iterates active criteria in display order.
    pub fn active_criteria(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter().filter(|criterion| criterion.active)
    }

    /// Iterates all criteria in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}
