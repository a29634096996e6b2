//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Reference Data Ports
//!
//! - `CriterionCatalogReader` - Criterion catalog snapshot
//! - `InfluenceGraphReader` - Validated influence graph snapshot
//!
//! ## Attribute Ports
//!
//! - `AttributeReader` - Raw criterion values per alternative

mod attribute_reader;
mod criterion_catalog_reader;
mod data_source_error;
mod influence_graph_reader;

pub use attribute_reader::AttributeReader;
pub use criterion_catalog_reader::CriterionCatalogReader;
pub use data_source_error::DataSourceError;
pub use influence_graph_reader::InfluenceGraphReader;
