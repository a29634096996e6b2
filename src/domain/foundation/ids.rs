//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Identifier of an alternative (a rental listing).
///
/// Alternatives are managed outside the engine; only the id is carried around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlternativeId(i64);

impl AlternativeId {
    /// Creates an AlternativeId from its raw value.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for AlternativeId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for AlternativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AlternativeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Code of an evaluation criterion, e.g. `PRICE` or `RATING_OVERALL`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionCode(String);

impl CriterionCode {
    pub const PRICE: &'static str = "PRICE";
    pub const RATING_OVERALL: &'static str = "RATING_OVERALL";
    pub const RATING_CLEANLINESS: &'static str = "RATING_CLEANLINESS";
    pub const RATING_LOCATION: &'static str = "RATING_LOCATION";
    pub const RATING_VALUE: &'static str = "RATING_VALUE";
    pub const DISTANCE_CENTER: &'static str = "DISTANCE_CENTER";
    pub const AMENITIES_COUNT: &'static str = "AMENITIES_COUNT";
    pub const VIEW_QUALITY: &'static str = "VIEW_QUALITY";

    /// Creates a new CriterionCode, rejecting blank codes.
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(ValidationError::empty_field("criterion_code"));
        }
        Ok(Self(code))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CriterionCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl Borrow<str> for CriterionCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CriterionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CriterionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternative_id_orders_by_value() {
        let mut ids = vec![AlternativeId::new(3), AlternativeId::new(1), AlternativeId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![AlternativeId::new(1), AlternativeId::new(2), AlternativeId::new(3)]);
    }

    #[test]
    fn alternative_id_parses_from_string() {
        let id: AlternativeId = " 42 ".parse().unwrap();
        assert_eq!(id.value(), 42);
        assert!("abc".parse::<AlternativeId>().is_err());
    }

    #[test]
    fn alternative_id_serializes_transparently() {
        let json = serde_json::to_string(&AlternativeId::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn criterion_code_rejects_blank() {
        assert!(CriterionCode::new("").is_err());
        assert!(CriterionCode::new("   ").is_err());
        assert_eq!(CriterionCode::new("PRICE").unwrap().as_str(), "PRICE");
    }

    #[test]
    fn criterion_code_borrows_as_str_for_map_lookups() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(CriterionCode::from(CriterionCode::PRICE), 0.5);
        assert_eq!(map.get("PRICE"), Some(&0.5));
    }

    #[test]
    fn criterion_code_serializes_transparently() {
        let code = CriterionCode::from("VIEW_QUALITY");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"VIEW_QUALITY\"");
        let back: CriterionCode = serde_json::from_str("\"VIEW_QUALITY\"").unwrap();
        assert_eq!(back, code);
    }
}
