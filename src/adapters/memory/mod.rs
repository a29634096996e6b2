//! In-memory adapters for reference data and attributes.
//!
//! Used by tests and for running the engine without a database.

mod attribute_store;
mod reference_data;
pub mod seed;

pub use attribute_store::InMemoryAttributeStore;
pub use reference_data::{InMemoryCatalogReader, InMemoryInfluenceGraphReader};
