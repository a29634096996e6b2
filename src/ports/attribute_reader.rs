//! Attribute reader port.
//!
//! Supplies the raw per-alternative criterion values a decision matrix is
//! built from. Implementations only filter; they never default missing
//! values or reorder rows for the caller.

use async_trait::async_trait;

use super::DataSourceError;
use crate::domain::foundation::{AlternativeId, CriterionCode};
use crate::domain::ranking::AttributeValue;

/// Read-only port for stored alternative attributes.
#[async_trait]
pub trait AttributeReader: Send + Sync {
    /// Returns every stored value for the given alternatives and criteria.
    ///
    /// Alternatives or criteria without stored values simply produce no rows.
    async fn read_attributes(
        &self,
        alternatives: &[AlternativeId],
        criteria: &[CriterionCode],
    ) -> Result<Vec<AttributeValue>, DataSourceError>;
}
