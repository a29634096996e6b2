//! Errors surfaced by the recommendation handlers.

use crate::domain::catalog::CatalogError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::ranking::RankingError;
use crate::ports::DataSourceError;

/// Failure of a recommendation request. No partial result accompanies it.
#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("Invalid input: {message}")]
    InvalidInput { code: ErrorCode, message: String },

    #[error("Data source failure: {0}")]
    DataSource(DataSourceError),

    #[error("Invalid reference data: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Ranking failed: {0}")]
    Ranking(#[from] RankingError),
}

impl RecommendationError {
    pub fn invalid_input(code: ErrorCode, message: impl Into<String>) -> Self {
        RecommendationError::InvalidInput {
            code,
            message: message.into(),
        }
    }
}

impl From<DataSourceError> for RecommendationError {
    fn from(err: DataSourceError) -> Self {
        match err {
            DataSourceError::InvalidReferenceData(catalog) => RecommendationError::Catalog(catalog),
            other => RecommendationError::DataSource(other),
        }
    }
}

impl From<ValidationError> for RecommendationError {
    fn from(err: ValidationError) -> Self {
        RecommendationError::invalid_input(ErrorCode::ValidationFailed, err.to_string())
    }
}

impl From<RecommendationError> for DomainError {
    fn from(err: RecommendationError) -> Self {
        match err {
            RecommendationError::InvalidInput { code, message } => DomainError::new(code, message),
            RecommendationError::DataSource(e) => e.into(),
            RecommendationError::Catalog(e) => e.into(),
            RecommendationError::Ranking(e) => e.into(),
        }
    }
}
