//! Category tree orchestration.

use tracing::info;

use freshmart_catalog::Category;
use freshmart_core::{CategoryId, DomainError, DomainResult};

use crate::store::CategoryStore;

/// Category creation and the leaf gate for SPU assignment.
#[derive(Debug)]
pub struct CategoryService<C> {
    categories: C,
}

impl<C: CategoryStore> CategoryService<C> {
    pub fn new(categories: C) -> Self {
        Self { categories }
    }

    /// Create a category under `parent_id` (or a root when `None`), deriving
    /// the level from the parent.
    pub fn create_category(
        &self,
        code: impl Into<String>,
        name: impl Into<String>,
        parent_id: Option<CategoryId>,
        sort_order: i32,
    ) -> DomainResult<CategoryId> {
        let code = code.into();
        if self.categories.exists_code(&code)? {
            return Err(DomainError::already_exists(format!("category code '{code}'")));
        }

        let parent = match parent_id {
            Some(parent_id) => Some(
                self.categories
                    .find(parent_id)?
                    .ok_or(DomainError::CategoryNotFound)?,
            ),
            None => None,
        };

        let category = Category::new(
            code,
            name,
            parent.map(|p| (p.id, p.level)),
            sort_order,
        )?;
        let category_id = category.id;
        let level = category.level;
        self.categories.insert(category)?;

        info!(%category_id, level, "category created");
        Ok(category_id)
    }

    /// Confirm the category exists and has no children. SPUs may only
    /// reference leaf categories, so this gates SPU category assignment.
    pub fn assert_leaf(&self, category_id: CategoryId) -> DomainResult<()> {
        if self.categories.find(category_id)?.is_none() {
            return Err(DomainError::CategoryNotFound);
        }
        if self.categories.has_children(category_id)? {
            return Err(DomainError::CategoryNotLeaf);
        }
        Ok(())
    }

    /// Direct children, in sort order.
    pub fn children(&self, category_id: CategoryId) -> DomainResult<Vec<Category>> {
        if self.categories.find(category_id)?.is_none() {
            return Err(DomainError::CategoryNotFound);
        }
        Ok(self.categories.children_of(category_id)?)
    }
}
