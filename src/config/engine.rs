//! Decision engine limits

use serde::Deserialize;

use super::error::ValidationError;

/// Upper bound for `max_result_limit`.
pub const RESULT_LIMIT_CEILING: u32 = 1000;

/// Request bounds enforced by the recommendation handler
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Largest `limit` a request may ask for
    #[serde(default = "default_max_result_limit")]
    pub max_result_limit: u32,

    /// Largest number of distinct candidates per request
    #[serde(default = "default_max_candidates")]
    pub max_candidates: u32,

    /// Limit used when a request does not give one
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_result_limit == 0 || self.max_result_limit > RESULT_LIMIT_CEILING {
            return Err(ValidationError::InvalidResultLimitCap {
                max: RESULT_LIMIT_CEILING,
                actual: self.max_result_limit,
            });
        }
        if self.default_limit == 0 || self.default_limit > self.max_result_limit {
            return Err(ValidationError::InvalidDefaultLimit {
                default: self.default_limit,
                cap: self.max_result_limit,
            });
        }
        if self.max_candidates == 0 {
            return Err(ValidationError::InvalidCandidateCap);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_result_limit: default_max_result_limit(),
            max_candidates: default_max_candidates(),
            default_limit: default_limit(),
        }
    }
}

fn default_max_result_limit() -> u32 {
    100
}

fn default_max_candidates() -> u32 {
    100
}

fn default_limit() -> u32 {
    10
}
