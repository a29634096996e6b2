//! Preferences Module - From user preference scalars to criterion weights.
//!
//! # Components
//!
//! - `Preferences` - Tagged preference input (direct or legacy)
//! - `WeightResolver` - Direct mapping or influence-graph propagation
//! - `WeightVector` - Normalized weights, the single place the unit-sum rule is enforced
//! - `explain_weights` - Per-criterion weight breakdown for display

mod user_preferences;
mod weight_explanation;
mod weight_resolver;
mod weight_vector;

pub use user_preferences::{DirectPreferences, LegacyPreferences, Preferences, NEUTRAL_PREFERENCE};
pub use weight_explanation::{explain_weights, WeightExplanation};
pub use weight_resolver::{WeightResolver, COMFORT_NODE, CONVENIENCE_NODE, VALUE_NODE};
pub use weight_vector::WeightVector;
