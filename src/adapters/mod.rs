//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory readers and the StayHub seed data
//! - `postgres` - PostgreSQL readers

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryAttributeStore, InMemoryCatalogReader, InMemoryInfluenceGraphReader};
pub use postgres::{PostgresAttributeReader, PostgresReferenceDataReader};
