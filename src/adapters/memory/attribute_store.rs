//! In-memory attribute store.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};

use crate::domain::foundation::{AlternativeId, CriterionCode};
use crate::domain::ranking::AttributeValue;
use crate::ports::{AttributeReader, DataSourceError};

/// Attribute reader over values held in memory.
///
/// Built up front with [`InMemoryAttributeStore::with_value`]; later values
/// for the same alternative and criterion replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttributeStore {
    values: BTreeMap<(AlternativeId, CriterionCode), f64>,
}

impl InMemoryAttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(
        mut self,
        alternative_id: impl Into<AlternativeId>,
        criterion_code: impl Into<CriterionCode>,
        value: f64,
    ) -> Self {
        self.values
            .insert((alternative_id.into(), criterion_code.into()), value);
        self
    }

    /// Adds several values for one alternative.
    pub fn with_alternative(
        self,
        alternative_id: impl Into<AlternativeId>,
        values: &[(&str, f64)],
    ) -> Self {
        let alternative_id = alternative_id.into();
        values.iter().fold(self, |store, (code, value)| {
            store.with_value(alternative_id, *code, *value)
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[async_trait]
impl AttributeReader for InMemoryAttributeStore {
    async fn read_attributes(
        &self,
        alternatives: &[AlternativeId],
        criteria: &[CriterionCode],
    ) -> Result<Vec<AttributeValue>, DataSourceError> {
        let alternatives: HashSet<&AlternativeId> = alternatives.iter().collect();
        let criteria: HashSet<&CriterionCode> = criteria.iter().collect();

        Ok(self
            .values
            .iter()
            .filter(|((id, code), _)| alternatives.contains(id) && criteria.contains(code))
            .map(|((id, code), value)| AttributeValue {
                alternative_id: *id,
                criterion_code: code.clone(),
                value: *value,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_only_requested_values() {
        let store = InMemoryAttributeStore::new()
            .with_alternative(1, &[("PRICE", 100.0), ("RATING_OVERALL", 4.0)])
            .with_alternative(2, &[("PRICE", 50.0)]);

        let values = store
            .read_attributes(&[AlternativeId::new(1)], &["PRICE".into()])
            .await
            .unwrap();

        assert_eq!(values, vec![AttributeValue::new(1, "PRICE", 100.0)]);
    }

    #[tokio::test]
    async fn later_values_replace_earlier_ones() {
        let store = InMemoryAttributeStore::new()
            .with_value(1, "PRICE", 100.0)
            .with_value(1, "PRICE", 80.0);

        assert_eq!(store.len(), 1);
        let values = store
            .read_attributes(&[AlternativeId::new(1)], &["PRICE".into()])
            .await
            .unwrap();
        assert_eq!(values[0].value, 80.0);
    }

    #[tokio::test]
    async fn unknown_alternatives_produce_no_rows() {
        let store = InMemoryAttributeStore::new().with_value(1, "PRICE", 100.0);
        let values = store
            .read_attributes(&[AlternativeId::new(9)], &["PRICE".into()])
            .await
            .unwrap();
        assert!(values.is_empty());
    }
}
