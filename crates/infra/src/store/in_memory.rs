//! In-memory store implementations.
//!
//! Intended for tests/dev. Not optimized for performance. The stock store's
//! version compare runs under the write lock, which is what gives the CAS its
//! atomicity here; a SQL implementation would use a
//! `WHERE version = ?` guard instead.

use std::collections::HashMap;
use std::sync::RwLock;

use freshmart_catalog::{Attribute, Category, CategoryAttribute};
use freshmart_core::{AttributeId, CategoryId, SkuId, SpuId};
use freshmart_inventory::SkuStock;
use freshmart_pricing::{Channel, SkuPrice};
use freshmart_products::{Sku, Spu};

use super::r#trait::{
    AttributeStore, CategoryAttributeStore, CategoryStore, SkuPriceStore, SkuStockStore, SkuStore,
    SpuStore, StoreError,
};

#[derive(Debug, Default)]
pub struct InMemorySkuStockStore {
    records: RwLock<HashMap<SkuId, SkuStock>>,
}

impl InMemorySkuStockStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SkuStockStore for InMemorySkuStockStore {
    fn insert(&self, stock: SkuStock) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        if records.contains_key(&stock.sku_id) {
            return Err(StoreError::AlreadyExists(format!(
                "stock ledger for sku {}",
                stock.sku_id
            )));
        }
        records.insert(stock.sku_id, stock);
        Ok(())
    }

    fn find_by_sku(&self, sku_id: SkuId) -> Result<Option<SkuStock>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(&sku_id).cloned())
    }

    fn exists(&self, sku_id: SkuId) -> Result<bool, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.contains_key(&sku_id))
    }

    fn update(&self, stock: &SkuStock, expected_version: u64) -> Result<bool, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        match records.get(&stock.sku_id) {
            Some(stored) if stored.version() == expected_version => {
                records.insert(stock.sku_id, stock.at_version(expected_version + 1));
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemorySkuPriceStore {
    records: RwLock<Vec<SkuPrice>>,
}

impl InMemorySkuPriceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SkuPriceStore for InMemorySkuPriceStore {
    fn append(&self, price: SkuPrice) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records.push(price);
        Ok(())
    }

    fn find_by_sku_and_channel(
        &self,
        sku_id: SkuId,
        channel: Channel,
    ) -> Result<Vec<SkuPrice>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records
            .iter()
            .filter(|p| p.sku_id == sku_id && p.channel == channel)
            .cloned()
            .collect())
    }

    fn find_by_skus_and_channel(
        &self,
        sku_ids: &[SkuId],
        channel: Channel,
    ) -> Result<Vec<SkuPrice>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records
            .iter()
            .filter(|p| p.channel == channel && sku_ids.contains(&p.sku_id))
            .cloned()
            .collect())
    }

    fn find_by_sku(&self, sku_id: SkuId) -> Result<Vec<SkuPrice>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.iter().filter(|p| p.sku_id == sku_id).cloned().collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCategoryStore {
    records: RwLock<HashMap<CategoryId, Category>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CategoryStore for InMemoryCategoryStore {
    fn insert(&self, category: Category) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        if records.values().any(|c| c.code == category.code) {
            return Err(StoreError::AlreadyExists(format!(
                "category code '{}'",
                category.code
            )));
        }
        records.insert(category.id, category);
        Ok(())
    }

    fn find(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(&id).cloned())
    }

    fn exists_code(&self, code: &str) -> Result<bool, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.values().any(|c| c.code == code))
    }

    fn children_of(&self, id: CategoryId) -> Result<Vec<Category>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        let mut children: Vec<Category> = records
            .values()
            .filter(|c| c.parent_id == Some(id))
            .cloned()
            .collect();
        children.sort_by_key(|c| c.sort_order);
        Ok(children)
    }

    fn has_children(&self, id: CategoryId) -> Result<bool, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.values().any(|c| c.parent_id == Some(id)))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryAttributeStore {
    records: RwLock<HashMap<AttributeId, Attribute>>,
}

impl InMemoryAttributeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttributeStore for InMemoryAttributeStore {
    fn insert(&self, attribute: Attribute) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        if records.values().any(|a| a.name == attribute.name) {
            return Err(StoreError::AlreadyExists(format!(
                "attribute name '{}'",
                attribute.name
            )));
        }
        records.insert(attribute.id, attribute);
        Ok(())
    }

    fn find(&self, id: AttributeId) -> Result<Option<Attribute>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(&id).cloned())
    }

    fn find_many(&self, ids: &[AttributeId]) -> Result<Vec<Attribute>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(ids.iter().filter_map(|id| records.get(id).cloned()).collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCategoryAttributeStore {
    records: RwLock<Vec<CategoryAttribute>>,
}

impl InMemoryCategoryAttributeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CategoryAttributeStore for InMemoryCategoryAttributeStore {
    fn insert(&self, association: CategoryAttribute) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let duplicate = records.iter().any(|a| {
            a.category_id == association.category_id && a.attribute_id == association.attribute_id
        });
        if duplicate {
            return Err(StoreError::AlreadyExists(format!(
                "association ({}, {})",
                association.category_id, association.attribute_id
            )));
        }
        records.push(association);
        Ok(())
    }

    fn find_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<CategoryAttribute>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        let mut associations: Vec<CategoryAttribute> = records
            .iter()
            .filter(|a| a.category_id == category_id)
            .cloned()
            .collect();
        associations.sort_by_key(|a| a.sort_order);
        Ok(associations)
    }
}

#[derive(Debug, Default)]
pub struct InMemorySpuStore {
    records: RwLock<HashMap<SpuId, Spu>>,
}

impl InMemorySpuStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpuStore for InMemorySpuStore {
    fn insert(&self, spu: Spu) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records.insert(spu.id, spu);
        Ok(())
    }

    fn find(&self, id: SpuId) -> Result<Option<Spu>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(&id).cloned())
    }

    fn update(&self, spu: &Spu) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records.insert(spu.id, spu.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemorySkuStore {
    records: RwLock<HashMap<SkuId, Sku>>,
}

impl InMemorySkuStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SkuStore for InMemorySkuStore {
    fn insert(&self, sku: Sku) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        if records.values().any(|s| s.code == sku.code) {
            return Err(StoreError::AlreadyExists(format!("sku code '{}'", sku.code)));
        }
        records.insert(sku.id, sku);
        Ok(())
    }

    fn find(&self, id: SkuId) -> Result<Option<Sku>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(&id).cloned())
    }

    fn exists_code(&self, code: &str) -> Result<bool, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.values().any(|s| s.code == code))
    }

    fn find_by_spu(&self, spu_id: SpuId) -> Result<Vec<Sku>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.values().filter(|s| s.spu_id == spu_id).cloned().collect())
    }

    fn has_enabled(&self, spu_id: SpuId) -> Result<bool, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records
            .values()
            .any(|s| s.spu_id == spu_id && s.enabled && !s.deleted))
    }

    fn update(&self, sku: &Sku) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records.insert(sku.id, sku.clone());
        Ok(())
    }
}
