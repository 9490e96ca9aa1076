//! Specification validation against stored category schemas.

use std::collections::HashMap;

use freshmart_catalog::{Attribute, SchemaEntry, Specifications, validate_specifications};
use freshmart_core::{AttributeId, CategoryId, DomainResult};

use crate::store::{AttributeStore, CategoryAttributeStore};

/// Load the schema of a category: its associations joined to their attribute
/// definitions, in association sort order. Associations whose definition has
/// vanished are skipped.
pub(crate) fn load_schema<A, CA>(
    attributes: &A,
    associations: &CA,
    category_id: CategoryId,
) -> DomainResult<Vec<SchemaEntry>>
where
    A: AttributeStore,
    CA: CategoryAttributeStore,
{
    let bindings = associations.find_by_category(category_id)?;
    if bindings.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<AttributeId> = bindings.iter().map(|b| b.attribute_id).collect();
    let definitions: HashMap<AttributeId, Attribute> = attributes
        .find_many(&ids)?
        .into_iter()
        .map(|attribute| (attribute.id, attribute))
        .collect();

    let mut schema = Vec::with_capacity(bindings.len());
    for binding in bindings {
        if let Some(attribute) = definitions.get(&binding.attribute_id) {
            schema.push(SchemaEntry {
                attribute: attribute.clone(),
                required: binding.required,
            });
        }
    }
    Ok(schema)
}

/// Validates candidate specification maps against a category's attribute
/// schema (the repository-facing half of the validator; the rules themselves
/// live in `freshmart_catalog::validator`).
#[derive(Debug)]
pub struct SpecificationService<A, CA> {
    attributes: A,
    associations: CA,
}

impl<A: AttributeStore, CA: CategoryAttributeStore> SpecificationService<A, CA> {
    pub fn new(attributes: A, associations: CA) -> Self {
        Self { attributes, associations }
    }

    /// Type-check `specs` against the category's schema. Categories with no
    /// schema accept any non-empty map.
    pub fn validate(&self, category_id: CategoryId, specs: &Specifications) -> DomainResult<()> {
        let schema = load_schema(&self.attributes, &self.associations, category_id)?;
        validate_specifications(&schema, specs)
    }
}
