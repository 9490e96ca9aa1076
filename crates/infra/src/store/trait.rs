//! Persistence collaborator traits.
//!
//! The core consumes keyed record stores through these traits; the only
//! non-CRUD contract is [`SkuStockStore::update`], a compare-and-swap write
//! carrying the version read at the start of the operation. Implementations
//! decide the mechanics (in-memory map, SQL row with a version column, ...).

use std::sync::Arc;

use thiserror::Error;

use freshmart_catalog::{Attribute, Category, CategoryAttribute};
use freshmart_core::{AttributeId, CategoryId, DomainError, SkuId, SpuId};
use freshmart_inventory::SkuStock;
use freshmart_pricing::{Channel, SkuPrice};
use freshmart_products::{Sku, Spu};

/// Storage-layer failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("record already exists: {0}")]
    AlreadyExists(String),

    /// Internal store lock poisoned; the store is unusable.
    #[error("store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for DomainError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::AlreadyExists(msg) => DomainError::AlreadyExists(msg),
            StoreError::Poisoned => DomainError::invariant("store lock poisoned"),
        }
    }
}

/// Keyed stock-ledger store with compare-and-swap semantics.
pub trait SkuStockStore: Send + Sync {
    /// Fails with [`StoreError::AlreadyExists`] when the SKU already has a ledger.
    fn insert(&self, stock: SkuStock) -> Result<(), StoreError>;

    fn find_by_sku(&self, sku_id: SkuId) -> Result<Option<SkuStock>, StoreError>;

    fn exists(&self, sku_id: SkuId) -> Result<bool, StoreError>;

    /// Versioned write: accepted only if the stored version still equals
    /// `expected_version` (the version read at the start of the operation).
    /// On acceptance the stored copy advances to `expected_version + 1`.
    /// Returns whether the write was accepted — the retry loop consumes this
    /// flag; a rejected write is not an error.
    fn update(&self, stock: &SkuStock, expected_version: u64) -> Result<bool, StoreError>;
}

/// Append-only price-record store.
pub trait SkuPriceStore: Send + Sync {
    /// Price changes always append; nothing ever mutates an existing record.
    fn append(&self, price: SkuPrice) -> Result<(), StoreError>;

    fn find_by_sku_and_channel(
        &self,
        sku_id: SkuId,
        channel: Channel,
    ) -> Result<Vec<SkuPrice>, StoreError>;

    fn find_by_skus_and_channel(
        &self,
        sku_ids: &[SkuId],
        channel: Channel,
    ) -> Result<Vec<SkuPrice>, StoreError>;

    /// Every record of the SKU across all channels (index rebuilds).
    fn find_by_sku(&self, sku_id: SkuId) -> Result<Vec<SkuPrice>, StoreError>;
}

/// Category tree with parent/child lookup.
pub trait CategoryStore: Send + Sync {
    /// Fails with [`StoreError::AlreadyExists`] on a duplicate category code.
    fn insert(&self, category: Category) -> Result<(), StoreError>;

    fn find(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    fn exists_code(&self, code: &str) -> Result<bool, StoreError>;

    fn children_of(&self, id: CategoryId) -> Result<Vec<Category>, StoreError>;

    fn has_children(&self, id: CategoryId) -> Result<bool, StoreError>;
}

pub trait AttributeStore: Send + Sync {
    /// Fails with [`StoreError::AlreadyExists`] on a duplicate attribute name.
    fn insert(&self, attribute: Attribute) -> Result<(), StoreError>;

    fn find(&self, id: AttributeId) -> Result<Option<Attribute>, StoreError>;

    fn find_many(&self, ids: &[AttributeId]) -> Result<Vec<Attribute>, StoreError>;
}

pub trait CategoryAttributeStore: Send + Sync {
    /// Fails with [`StoreError::AlreadyExists`] on a duplicate
    /// (category, attribute) pair.
    fn insert(&self, association: CategoryAttribute) -> Result<(), StoreError>;

    fn find_by_category(&self, category_id: CategoryId)
    -> Result<Vec<CategoryAttribute>, StoreError>;
}

pub trait SpuStore: Send + Sync {
    fn insert(&self, spu: Spu) -> Result<(), StoreError>;

    /// Returns soft-deleted SPUs too; callers decide how deletion gates the
    /// operation (`AlreadyDeleted` vs not-found).
    fn find(&self, id: SpuId) -> Result<Option<Spu>, StoreError>;

    fn update(&self, spu: &Spu) -> Result<(), StoreError>;
}

pub trait SkuStore: Send + Sync {
    /// Fails with [`StoreError::AlreadyExists`] on a duplicate SKU code.
    fn insert(&self, sku: Sku) -> Result<(), StoreError>;

    fn find(&self, id: SkuId) -> Result<Option<Sku>, StoreError>;

    fn exists_code(&self, code: &str) -> Result<bool, StoreError>;

    fn find_by_spu(&self, spu_id: SpuId) -> Result<Vec<Sku>, StoreError>;

    /// Whether the SPU has at least one enabled, non-deleted SKU (the
    /// publish gate).
    fn has_enabled(&self, spu_id: SpuId) -> Result<bool, StoreError>;

    fn update(&self, sku: &Sku) -> Result<(), StoreError>;
}

// Shared ownership: services and projections hold the same store instance.
impl<T: SkuStockStore + ?Sized> SkuStockStore for Arc<T> {
    fn insert(&self, stock: SkuStock) -> Result<(), StoreError> {
        (**self).insert(stock)
    }

    fn find_by_sku(&self, sku_id: SkuId) -> Result<Option<SkuStock>, StoreError> {
        (**self).find_by_sku(sku_id)
    }

    fn exists(&self, sku_id: SkuId) -> Result<bool, StoreError> {
        (**self).exists(sku_id)
    }

    fn update(&self, stock: &SkuStock, expected_version: u64) -> Result<bool, StoreError> {
        (**self).update(stock, expected_version)
    }
}

impl<T: SkuPriceStore + ?Sized> SkuPriceStore for Arc<T> {
    fn append(&self, price: SkuPrice) -> Result<(), StoreError> {
        (**self).append(price)
    }

    fn find_by_sku_and_channel(
        &self,
        sku_id: SkuId,
        channel: Channel,
    ) -> Result<Vec<SkuPrice>, StoreError> {
        (**self).find_by_sku_and_channel(sku_id, channel)
    }

    fn find_by_skus_and_channel(
        &self,
        sku_ids: &[SkuId],
        channel: Channel,
    ) -> Result<Vec<SkuPrice>, StoreError> {
        (**self).find_by_skus_and_channel(sku_ids, channel)
    }

    fn find_by_sku(&self, sku_id: SkuId) -> Result<Vec<SkuPrice>, StoreError> {
        (**self).find_by_sku(sku_id)
    }
}

impl<T: CategoryStore + ?Sized> CategoryStore for Arc<T> {
    fn insert(&self, category: Category) -> Result<(), StoreError> {
        (**self).insert(category)
    }

    fn find(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        (**self).find(id)
    }

    fn exists_code(&self, code: &str) -> Result<bool, StoreError> {
        (**self).exists_code(code)
    }

    fn children_of(&self, id: CategoryId) -> Result<Vec<Category>, StoreError> {
        (**self).children_of(id)
    }

    fn has_children(&self, id: CategoryId) -> Result<bool, StoreError> {
        (**self).has_children(id)
    }
}

impl<T: AttributeStore + ?Sized> AttributeStore for Arc<T> {
    fn insert(&self, attribute: Attribute) -> Result<(), StoreError> {
        (**self).insert(attribute)
    }

    fn find(&self, id: AttributeId) -> Result<Option<Attribute>, StoreError> {
        (**self).find(id)
    }

    fn find_many(&self, ids: &[AttributeId]) -> Result<Vec<Attribute>, StoreError> {
        (**self).find_many(ids)
    }
}

impl<T: CategoryAttributeStore + ?Sized> CategoryAttributeStore for Arc<T> {
    fn insert(&self, association: CategoryAttribute) -> Result<(), StoreError> {
        (**self).insert(association)
    }

    fn find_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<CategoryAttribute>, StoreError> {
        (**self).find_by_category(category_id)
    }
}

impl<T: SpuStore + ?Sized> SpuStore for Arc<T> {
    fn insert(&self, spu: Spu) -> Result<(), StoreError> {
        (**self).insert(spu)
    }

    fn find(&self, id: SpuId) -> Result<Option<Spu>, StoreError> {
        (**self).find(id)
    }

    fn update(&self, spu: &Spu) -> Result<(), StoreError> {
        (**self).update(spu)
    }
}

impl<T: SkuStore + ?Sized> SkuStore for Arc<T> {
    fn insert(&self, sku: Sku) -> Result<(), StoreError> {
        (**self).insert(sku)
    }

    fn find(&self, id: SkuId) -> Result<Option<Sku>, StoreError> {
        (**self).find(id)
    }

    fn exists_code(&self, code: &str) -> Result<bool, StoreError> {
        (**self).exists_code(code)
    }

    fn find_by_spu(&self, spu_id: SpuId) -> Result<Vec<Sku>, StoreError> {
        (**self).find_by_spu(spu_id)
    }

    fn has_enabled(&self, spu_id: SpuId) -> Result<bool, StoreError> {
        (**self).has_enabled(spu_id)
    }

    fn update(&self, sku: &Sku) -> Result<(), StoreError> {
        (**self).update(sku)
    }
}
