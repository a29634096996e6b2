//! Domain layer containing the decision engine's types and pure services.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, criterion codes, errors)
//! - `catalog` - Criterion catalog and influence graph snapshots
//! - `preferences` - Preference input and weight resolution
//! - `ranking` - Decision matrix, TOPSIS ranking, and explanations

pub mod catalog;
pub mod foundation;
pub mod preferences;
pub mod ranking;
