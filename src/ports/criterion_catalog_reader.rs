//! Criterion catalog reader port.

use async_trait::async_trait;

use super::DataSourceError;
use crate::domain::catalog::CriterionCatalog;

/// Read-only port for the criterion catalog.
#[async_trait]
pub trait CriterionCatalogReader: Send + Sync {
    /// Loads a snapshot of every criterion, active or not.
    async fn load_catalog(&self) -> Result<CriterionCatalog, DataSourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockCatalogReader;

    #[async_trait]
    impl CriterionCatalogReader for MockCatalogReader {
        async fn load_catalog(&self) -> Result<CriterionCatalog, DataSourceError> {
            unimplemented!("Mock for testing trait only")
        }
    }

    #[test]
    fn test_reader_trait_compiles() {
        let _reader: Box<dyn CriterionCatalogReader> = Box::new(MockCatalogReader);
    }
}
