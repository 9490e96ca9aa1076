//! Specification validation against a category's attribute schema.

use freshmart_core::{DomainError, DomainResult};

use crate::attribute::Attribute;
use crate::specification::Specifications;

/// One attribute of a category's schema with its association flags, as loaded
/// by the service layer (association joined to its definition).
#[derive(Debug, Clone)]
pub struct SchemaEntry {
    pub attribute: Attribute,
    pub required: bool,
}

/// Validate a specification map against a category schema.
///
/// - An empty schema accepts any (non-empty) map — categories without a
///   defined schema skip validation entirely.
/// - Every required attribute must appear as a key.
/// - Keys matching a defined attribute are type/range/enum checked.
/// - Keys with no matching definition pass through unvalidated, keeping the
///   schema forward-compatible.
pub fn validate_specifications(schema: &[SchemaEntry], specs: &Specifications) -> DomainResult<()> {
    if schema.is_empty() {
        return Ok(());
    }

    for entry in schema.iter().filter(|entry| entry.required) {
        if !specs.contains_key(&entry.attribute.name) {
            return Err(DomainError::RequiredAttributeMissing(
                entry.attribute.name.clone(),
            ));
        }
    }

    for (key, value) in specs.iter() {
        if let Some(entry) = schema.iter().find(|entry| &entry.attribute.name == key) {
            entry.attribute.validate_value(value)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{AttributeKind, NumberRange};
    use rust_decimal::Decimal;

    fn schema() -> Vec<SchemaEntry> {
        let color = Attribute::new(
            "color",
            AttributeKind::Enum {
                allowed: vec!["red".to_string(), "green".to_string()],
            },
        )
        .unwrap();
        let weight = Attribute::new(
            "weight",
            AttributeKind::Number {
                range: Some(NumberRange::new(Decimal::from(0), Decimal::from(1000)).unwrap()),
            },
        )
        .unwrap();
        let origin = Attribute::new("origin", AttributeKind::Text).unwrap();

        vec![
            SchemaEntry { attribute: color, required: true },
            SchemaEntry { attribute: weight, required: false },
            SchemaEntry { attribute: origin, required: false },
        ]
    }

    fn specs(json: &str) -> Specifications {
        Specifications::from_json(json).unwrap()
    }

    #[test]
    fn empty_schema_accepts_anything() {
        let result = validate_specifications(&[], &specs(r#"{"whatever": [1, 2, 3]}"#));
        assert!(result.is_ok());
    }

    #[test]
    fn missing_required_attribute_is_rejected() {
        let err = validate_specifications(&schema(), &specs(r#"{"weight": 10}"#)).unwrap_err();
        match err {
            DomainError::RequiredAttributeMissing(name) => assert_eq!(name, "color"),
            other => panic!("expected RequiredAttributeMissing, got {other:?}"),
        }
    }

    #[test]
    fn value_outside_range_is_rejected() {
        let err = validate_specifications(
            &schema(),
            &specs(r#"{"color": "red", "weight": 1500}"#),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::AttributeValueInvalid { .. }));
    }

    #[test]
    fn enum_violation_is_rejected() {
        let err =
            validate_specifications(&schema(), &specs(r#"{"color": "blue"}"#)).unwrap_err();
        assert!(matches!(err, DomainError::AttributeValueInvalid { .. }));
    }

    #[test]
    fn unknown_keys_pass_through() {
        let result = validate_specifications(
            &schema(),
            &specs(r#"{"color": "green", "shelf_life_days": 7}"#),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn valid_map_passes_all_checks() {
        let result = validate_specifications(
            &schema(),
            &specs(r#"{"color": "red", "weight": "250", "origin": "Shandong"}"#),
        );
        assert!(result.is_ok());
    }
}
