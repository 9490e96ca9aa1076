//! Attribute definitions and value constraints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use freshmart_core::{AttributeId, DomainError, DomainResult, Entity};

/// Inclusive numeric bounds for `NUMBER` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl NumberRange {
    pub fn new(min: Decimal, max: Decimal) -> DomainResult<Self> {
        if min > max {
            return Err(DomainError::invalid_argument(format!(
                "number range is inverted: min {min} > max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, value: Decimal) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Attribute type together with its type-dependent constraint.
///
/// The constraint shape follows the type, so a `TEXT` attribute cannot carry
/// an allowed list and an `ENUM` attribute cannot be rangeless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum AttributeKind {
    /// Free text.
    Text,
    /// Numeric value, optionally bounded.
    Number { range: Option<NumberRange> },
    /// One of a predefined, non-empty list of strings.
    Enum { allowed: Vec<String> },
}

impl AttributeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeKind::Text => "TEXT",
            AttributeKind::Number { .. } => "NUMBER",
            AttributeKind::Enum { .. } => "ENUM",
        }
    }
}

/// An attribute definition (unique name + typed constraint).
///
/// Definitions are shared across categories through associations; they are
/// validated here once, at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: AttributeId,
    pub name: String,
    pub kind: AttributeKind,
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invalid_argument("attribute name cannot be empty"));
        }
        if let AttributeKind::Enum { allowed } = &kind {
            if allowed.is_empty() {
                return Err(DomainError::invalid_argument(
                    "ENUM attribute requires a non-empty allowed list",
                ));
            }
        }
        Ok(Self {
            id: AttributeId::new(),
            name,
            kind,
        })
    }

    /// Check one specification value against this attribute's constraint.
    ///
    /// Numeric strings are accepted for `NUMBER` attributes; everything else
    /// must match the declared type. Errors carry the attribute name so the
    /// caller can surface which key was rejected.
    pub fn validate_value(&self, value: &Value) -> DomainResult<()> {
        match &self.kind {
            AttributeKind::Text => {
                if !value.is_string() {
                    return Err(DomainError::value_invalid(&self.name, "must be a string"));
                }
                Ok(())
            }
            AttributeKind::Number { range } => {
                let number = numeric_form(value).ok_or_else(|| {
                    DomainError::value_invalid(&self.name, "must be a number or numeric string")
                })?;
                if let Some(range) = range {
                    if !range.contains(number) {
                        return Err(DomainError::value_invalid(
                            &self.name,
                            format!("{number} outside range [{}, {}]", range.min, range.max),
                        ));
                    }
                }
                Ok(())
            }
            AttributeKind::Enum { allowed } => {
                let text = string_form(value);
                if !allowed.iter().any(|candidate| candidate == &text) {
                    return Err(DomainError::value_invalid(
                        &self.name,
                        format!("'{text}' not in allowed values {allowed:?}"),
                    ));
                }
                Ok(())
            }
        }
    }
}

impl Entity for Attribute {
    type Id = AttributeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Numeric reading of a JSON value, accepting numeric strings.
fn numeric_form(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// String form used for ENUM matching (unquoted for JSON strings).
fn string_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn number_attr(min: i64, max: i64) -> Attribute {
        let range = NumberRange::new(Decimal::from(min), Decimal::from(max)).unwrap();
        Attribute::new("weight", AttributeKind::Number { range: Some(range) }).unwrap()
    }

    #[test]
    fn enum_definition_requires_allowed_values() {
        let err = Attribute::new("color", AttributeKind::Enum { allowed: vec![] }).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn inverted_number_range_is_rejected() {
        let err = NumberRange::new(Decimal::from(10), Decimal::from(1)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn text_value_must_be_a_string() {
        let attr = Attribute::new("origin", AttributeKind::Text).unwrap();
        assert!(attr.validate_value(&json!("Yunnan")).is_ok());

        let err = attr.validate_value(&json!(3)).unwrap_err();
        assert!(matches!(err, DomainError::AttributeValueInvalid { .. }));
    }

    #[test]
    fn number_value_accepts_numbers_and_numeric_strings() {
        let attr = number_attr(0, 100);
        assert!(attr.validate_value(&json!(42)).is_ok());
        assert!(attr.validate_value(&json!("42.5")).is_ok());

        let err = attr.validate_value(&json!("heavy")).unwrap_err();
        assert!(matches!(err, DomainError::AttributeValueInvalid { .. }));
    }

    #[test]
    fn number_range_bounds_are_inclusive() {
        let attr = number_attr(1, 10);
        assert!(attr.validate_value(&json!(1)).is_ok());
        assert!(attr.validate_value(&json!(10)).is_ok());
        assert!(attr.validate_value(&json!(11)).is_err());
        assert!(attr.validate_value(&json!(0)).is_err());
    }

    #[test]
    fn enum_value_matches_on_string_form() {
        let attr = Attribute::new(
            "size",
            AttributeKind::Enum {
                allowed: vec!["S".to_string(), "M".to_string(), "500".to_string()],
            },
        )
        .unwrap();

        assert!(attr.validate_value(&json!("M")).is_ok());
        // A JSON number matches through its string form.
        assert!(attr.validate_value(&json!(500)).is_ok());

        let err = attr.validate_value(&json!("XL")).unwrap_err();
        match err {
            DomainError::AttributeValueInvalid { attribute, .. } => assert_eq!(attribute, "size"),
            other => panic!("expected AttributeValueInvalid, got {other:?}"),
        }
    }
}
