//! Attribute definition and association orchestration.

use tracing::info;

use freshmart_catalog::{Attribute, AttributeKind, CategoryAttribute, SchemaEntry};
use freshmart_core::{AttributeId, CategoryId, DomainError, DomainResult};

use crate::services::specification::load_schema;
use crate::store::{AttributeStore, CategoryAttributeStore, CategoryStore};

/// Manages attribute definitions and their category associations.
#[derive(Debug)]
pub struct AttributeService<A, CA, C> {
    attributes: A,
    associations: CA,
    categories: C,
}

impl<A, CA, C> AttributeService<A, CA, C>
where
    A: AttributeStore,
    CA: CategoryAttributeStore,
    C: CategoryStore,
{
    pub fn new(attributes: A, associations: CA, categories: C) -> Self {
        Self { attributes, associations, categories }
    }

    /// Create an attribute definition. The constraint is validated at
    /// construction (non-empty ENUM list, ordered NUMBER range); the store
    /// enforces name uniqueness.
    pub fn create_attribute(
        &self,
        name: impl Into<String>,
        kind: AttributeKind,
    ) -> DomainResult<AttributeId> {
        let attribute = Attribute::new(name, kind)?;
        let attribute_id = attribute.id;
        self.attributes.insert(attribute)?;

        info!(%attribute_id, "attribute created");
        Ok(attribute_id)
    }

    /// Associate an attribute with a category. Unique per
    /// (category, attribute) pair.
    pub fn associate(
        &self,
        category_id: CategoryId,
        attribute_id: AttributeId,
        required: bool,
        sort_order: i32,
    ) -> DomainResult<()> {
        if self.categories.find(category_id)?.is_none() {
            return Err(DomainError::CategoryNotFound);
        }
        if self.attributes.find(attribute_id)?.is_none() {
            return Err(DomainError::AttributeNotFound);
        }

        let association = CategoryAttribute::new(category_id, attribute_id, required, sort_order)?;
        self.associations.insert(association)?;

        info!(%category_id, %attribute_id, required, "attribute associated to category");
        Ok(())
    }

    /// The category's schema (associations joined to definitions, in sort
    /// order).
    pub fn category_schema(&self, category_id: CategoryId) -> DomainResult<Vec<SchemaEntry>> {
        load_schema(&self.attributes, &self.associations, category_id)
    }
}
