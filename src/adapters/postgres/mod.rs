//! PostgreSQL adapters - Database implementations of the reader ports.
//!
//! - `PostgresReferenceDataReader` - Criterion catalog and influence graph
//! - `PostgresAttributeReader` - Per-listing criterion values

mod attribute_reader;
mod reference_data_reader;

pub use attribute_reader::PostgresAttributeReader;
pub use reference_data_reader::PostgresReferenceDataReader;
