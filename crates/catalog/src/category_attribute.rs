//! Category/attribute association.

use serde::{Deserialize, Serialize};

use freshmart_core::{AttributeId, CategoryId, DomainError, DomainResult};

/// Binds an attribute definition to a category's schema.
///
/// Unique per `(category_id, attribute_id)`; the store enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAttribute {
    pub category_id: CategoryId,
    pub attribute_id: AttributeId,
    pub required: bool,
    pub sort_order: i32,
}

impl CategoryAttribute {
    pub fn new(
        category_id: CategoryId,
        attribute_id: AttributeId,
        required: bool,
        sort_order: i32,
    ) -> DomainResult<Self> {
        if sort_order < 0 {
            return Err(DomainError::invalid_argument("sort order cannot be negative"));
        }
        Ok(Self {
            category_id,
            attribute_id,
            required,
            sort_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_sort_order_is_rejected() {
        let err =
            CategoryAttribute::new(CategoryId::new(), AttributeId::new(), false, -1).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }
}
