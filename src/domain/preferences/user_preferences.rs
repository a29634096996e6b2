//! User preference scalars in their two supported shapes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::ValidationError;

/// Value assumed for any preference the user did not supply.
pub const NEUTRAL_PREFERENCE: f64 = 0.5;

fn neutral() -> f64 {
    NEUTRAL_PREFERENCE
}

/// Preferences that map straight onto criteria with fixed coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectPreferences {
    #[serde(default = "neutral")]
    pub price_sensitivity: f64,
    #[serde(default = "neutral")]
    pub comfort_priority: f64,
    #[serde(default = "neutral")]
    pub distance_tolerance: f64,
    #[serde(default = "neutral")]
    pub view_importance: f64,
    #[serde(default = "neutral")]
    pub cleanliness_priority: f64,
}

impl DirectPreferences {
    pub const PRICE_SENSITIVITY: &'static str = "price_sensitivity";
    pub const COMFORT_PRIORITY: &'static str = "comfort_priority";
    pub const DISTANCE_TOLERANCE: &'static str = "distance_tolerance";
    pub const VIEW_IMPORTANCE: &'static str = "view_importance";
    pub const CLEANLINESS_PRIORITY: &'static str = "cleanliness_priority";

    fn scalars(&self) -> [(&'static str, f64); 5] {
        [
            (Self::PRICE_SENSITIVITY, self.price_sensitivity),
            (Self::COMFORT_PRIORITY, self.comfort_priority),
            (Self::DISTANCE_TOLERANCE, self.distance_tolerance),
            (Self::VIEW_IMPORTANCE, self.view_importance),
            (Self::CLEANLINESS_PRIORITY, self.cleanliness_priority),
        ]
    }
}

impl Default for DirectPreferences {
    fn default() -> Self {
        Self {
            price_sensitivity: NEUTRAL_PREFERENCE,
            comfort_priority: NEUTRAL_PREFERENCE,
            distance_tolerance: NEUTRAL_PREFERENCE,
            view_importance: NEUTRAL_PREFERENCE,
            cleanliness_priority: NEUTRAL_PREFERENCE,
        }
    }
}

/// Preferences expressed against the influence diagram's intermediate factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegacyPreferences {
    #[serde(default = "neutral")]
    pub convenience_importance: f64,
    #[serde(default = "neutral")]
    pub comfort_importance: f64,
    #[serde(default = "neutral")]
    pub value_importance: f64,
}

impl LegacyPreferences {
    pub const CONVENIENCE_IMPORTANCE: &'static str = "convenience_importance";
    pub const COMFORT_IMPORTANCE: &'static str = "comfort_importance";
    pub const VALUE_IMPORTANCE: &'static str = "value_importance";

    fn scalars(&self) -> [(&'static str, f64); 3] {
        [
            (Self::CONVENIENCE_IMPORTANCE, self.convenience_importance),
            (Self::COMFORT_IMPORTANCE, self.comfort_importance),
            (Self::VALUE_IMPORTANCE, self.value_importance),
        ]
    }
}

impl Default for LegacyPreferences {
    fn default() -> Self {
        Self {
            convenience_importance: NEUTRAL_PREFERENCE,
            comfort_importance: NEUTRAL_PREFERENCE,
            value_importance: NEUTRAL_PREFERENCE,
        }
    }
}

/// Raw user preferences, tagged with the mapping mode they require.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Preferences {
    /// Mapped directly onto criteria; the influence graph is not consulted.
    Direct(DirectPreferences),
    /// Propagated through the influence graph's intermediate nodes.
    Legacy(LegacyPreferences),
}

impl Preferences {
    /// Converts an untagged bag of named scalars.
    ///
    /// The presence of `price_sensitivity` selects direct mode; anything else
    /// is read as legacy preferences. Missing keys take the neutral value and
    /// unrecognized keys are ignored.
    pub fn from_scalars(scalars: &HashMap<String, f64>) -> Self {
        let get = |key: &str| scalars.get(key).copied().unwrap_or(NEUTRAL_PREFERENCE);

        if scalars.contains_key(DirectPreferences::PRICE_SENSITIVITY) {
            Preferences::Direct(DirectPreferences {
                price_sensitivity: get(DirectPreferences::PRICE_SENSITIVITY),
                comfort_priority: get(DirectPreferences::COMFORT_PRIORITY),
                distance_tolerance: get(DirectPreferences::DISTANCE_TOLERANCE),
                view_importance: get(DirectPreferences::VIEW_IMPORTANCE),
                cleanliness_priority: get(DirectPreferences::CLEANLINESS_PRIORITY),
            })
        } else {
            Preferences::Legacy(LegacyPreferences {
                convenience_importance: get(LegacyPreferences::CONVENIENCE_IMPORTANCE),
                comfort_importance: get(LegacyPreferences::COMFORT_IMPORTANCE),
                value_importance: get(LegacyPreferences::VALUE_IMPORTANCE),
            })
        }
    }

    /// Short name of the mapping mode, for logs.
    pub fn mode(&self) -> &'static str {
        match self {
            Preferences::Direct(_) => "direct",
            Preferences::Legacy(_) => "legacy",
        }
    }

    /// Checks that every scalar is finite and non-negative.
    ///
    /// Scalars are not capped at 1.0.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let check = |(field, value): (&'static str, f64)| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ValidationError::not_non_negative(field, value))
            }
        };

        match self {
            Preferences::Direct(p) => p.scalars().into_iter().try_for_each(check),
            Preferences::Legacy(p) => p.scalars().into_iter().try_for_each(check),
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences::Direct(DirectPreferences::default())
    }
}
