//! `freshmart-catalog` — category tree, attribute schemas and specification
//! validation.

pub mod attribute;
pub mod category;
pub mod category_attribute;
pub mod specification;
pub mod validator;

pub use attribute::{Attribute, AttributeKind, NumberRange};
pub use category::Category;
pub use category_attribute::CategoryAttribute;
pub use specification::Specifications;
pub use validator::{SchemaEntry, validate_specifications};
