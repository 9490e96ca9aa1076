//! Category tree node.

use serde::{Deserialize, Serialize};

use freshmart_core::{CategoryId, DomainError, DomainResult, Entity};

/// A node of the category tree.
///
/// The level is derived, never chosen: a root is level 1 and a child is
/// always `parent.level + 1`. Only leaf categories (no children) may host
/// SPUs; that check needs the surrounding category set and lives in the
/// category service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Unique, human-assigned code.
    pub code: String,
    pub name: String,
    /// `None` marks a root category.
    pub parent_id: Option<CategoryId>,
    pub level: u32,
    pub sort_order: i32,
}

impl Category {
    /// Create a category under `parent` (id + level), or a root when `None`.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        parent: Option<(CategoryId, u32)>,
        sort_order: i32,
    ) -> DomainResult<Self> {
        let code = code.into();
        let name = name.into();
        Self::validate_code(&code)?;
        Self::validate_name(&name)?;

        let (parent_id, level) = match parent {
            Some((parent_id, parent_level)) => (Some(parent_id), parent_level + 1),
            None => (None, 1),
        };

        Ok(Self {
            id: CategoryId::new(),
            code,
            name,
            parent_id,
            level,
            sort_order,
        })
    }

    pub fn validate_code(code: &str) -> DomainResult<()> {
        if code.trim().is_empty() {
            return Err(DomainError::invalid_argument("category code cannot be empty"));
        }
        Ok(())
    }

    pub fn validate_name(name: &str) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(DomainError::invalid_argument("category name cannot be empty"));
        }
        Ok(())
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_category_is_level_one() {
        let root = Category::new("fruit", "Fruit", None, 0).unwrap();
        assert!(root.is_root());
        assert_eq!(root.level, 1);
    }

    #[test]
    fn child_level_is_parent_level_plus_one() {
        let root = Category::new("fruit", "Fruit", None, 0).unwrap();
        let child = Category::new("citrus", "Citrus", Some((root.id, root.level)), 0).unwrap();
        assert_eq!(child.parent_id, Some(root.id));
        assert_eq!(child.level, 2);

        let grandchild = Category::new("lemons", "Lemons", Some((child.id, child.level)), 1).unwrap();
        assert_eq!(grandchild.level, 3);
    }

    #[test]
    fn empty_code_is_rejected() {
        let err = Category::new("  ", "Fruit", None, 0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Category::new("fruit", "", None, 0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }
}
