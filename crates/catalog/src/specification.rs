//! Specification map value object.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use freshmart_core::{DomainError, DomainResult, ValueObject};

/// A SKU's free-form specification values, keyed by attribute name.
///
/// Guaranteed non-empty. Values stay as JSON values; typing is enforced
/// against the category schema by [`crate::validator::validate_specifications`],
/// not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Specifications(BTreeMap<String, Value>);

impl Specifications {
    pub fn new(specs: BTreeMap<String, Value>) -> DomainResult<Self> {
        if specs.is_empty() {
            return Err(DomainError::invalid_argument("specifications cannot be empty"));
        }
        Ok(Self(specs))
    }

    /// Parse from a JSON object string.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let specs: BTreeMap<String, Value> = serde_json::from_str(json)
            .map_err(|e| DomainError::invalid_argument(format!("invalid specification JSON: {e}")))?;
        Self::new(specs)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        // Construction rejects empty maps, so this is always false.
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl ValueObject for Specifications {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_map_is_rejected() {
        let err = Specifications::new(BTreeMap::new()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn parses_from_json_object() {
        let specs = Specifications::from_json(r#"{"color": "red", "weight": 500}"#).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs.get("color"), Some(&json!("red")));
        assert!(specs.contains_key("weight"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Specifications::from_json("not json").is_err());
        assert!(Specifications::from_json("{}").is_err());
    }

    #[test]
    fn equal_maps_are_equal_values() {
        let a = Specifications::from_json(r#"{"color": "red"}"#).unwrap();
        let b = Specifications::from_json(r#"{"color": "red"}"#).unwrap();
        assert_eq!(a, b);
    }
}
