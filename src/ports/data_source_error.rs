use crate::domain::catalog::CatalogError;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by the reference and attribute data sources.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid reference data: {0}")]
    InvalidReferenceData(#[from] CatalogError),

    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for DataSourceError {
    fn from(err: sqlx::Error) -> Self {
        DataSourceError::Database(err.to_string())
    }
}

impl From<DataSourceError> for DomainError {
    fn from(err: DataSourceError) -> Self {
        let code = match err {
            DataSourceError::InvalidReferenceData(_) => ErrorCode::InvalidReferenceData,
            DataSourceError::Database(_) | DataSourceError::Unavailable(_) => ErrorCode::DatabaseError,
        };
        DomainError::new(code, err.to_string())
    }
}
