//! Denormalized product-search read model.
//!
//! The index is owned by this projection, not by the core: it is rebuilt from
//! the stores whenever an [`IndexEvent`] arrives and is safe to lose. Rows
//! carry what search needs — name, category, active price range across all
//! channels, stock status and visibility flags.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use freshmart_core::{CategoryId, DomainResult, SkuId, SpuId};
use freshmart_events::IndexEvent;
use freshmart_inventory::StockStatus;
use freshmart_pricing::Money;
use freshmart_products::{Sku, Spu};

use crate::settings::StockSettings;
use crate::store::{SkuPriceStore, SkuStockStore, SkuStore, SpuStore, StoreError};

/// One search row, keyed by SKU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductIndexEntry {
    pub sku_id: SkuId,
    pub spu_id: SpuId,
    pub spu_name: String,
    pub category_id: CategoryId,
    /// Cheapest active price across all channels; `None` when unpriced.
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub stock_status: StockStatus,
    pub spu_deleted: bool,
    pub sku_enabled: bool,
}

impl ProductIndexEntry {
    pub fn is_visible(&self) -> bool {
        !self.spu_deleted && self.sku_enabled
    }
}

/// Read-model store for index rows.
pub trait ProductIndexStore: Send + Sync {
    fn upsert(&self, entry: ProductIndexEntry) -> Result<(), StoreError>;

    fn remove_by_spu(&self, spu_id: SpuId) -> Result<(), StoreError>;

    fn get_by_sku(&self, sku_id: SkuId) -> Result<Option<ProductIndexEntry>, StoreError>;

    /// Visible rows of one category. Exact match on the category id; the
    /// filter does not expand to descendant categories.
    fn visible_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<ProductIndexEntry>, StoreError>;
}

impl<T: ProductIndexStore + ?Sized> ProductIndexStore for Arc<T> {
    fn upsert(&self, entry: ProductIndexEntry) -> Result<(), StoreError> {
        (**self).upsert(entry)
    }

    fn remove_by_spu(&self, spu_id: SpuId) -> Result<(), StoreError> {
        (**self).remove_by_spu(spu_id)
    }

    fn get_by_sku(&self, sku_id: SkuId) -> Result<Option<ProductIndexEntry>, StoreError> {
        (**self).get_by_sku(sku_id)
    }

    fn visible_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<ProductIndexEntry>, StoreError> {
        (**self).visible_by_category(category_id)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProductIndexStore {
    rows: RwLock<HashMap<SkuId, ProductIndexEntry>>,
}

impl InMemoryProductIndexStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductIndexStore for InMemoryProductIndexStore {
    fn upsert(&self, entry: ProductIndexEntry) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        rows.insert(entry.sku_id, entry);
        Ok(())
    }

    fn remove_by_spu(&self, spu_id: SpuId) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        rows.retain(|_, entry| entry.spu_id != spu_id);
        Ok(())
    }

    fn get_by_sku(&self, sku_id: SkuId) -> Result<Option<ProductIndexEntry>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.get(&sku_id).cloned())
    }

    fn visible_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<ProductIndexEntry>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        Ok(rows
            .values()
            .filter(|entry| entry.category_id == category_id && entry.is_visible())
            .cloned()
            .collect())
    }
}

/// Rebuilds index rows from the stores on every signal.
///
/// Consumes [`IndexEvent`]s (typically from a bus subscription on its own
/// thread). Idempotent: a replayed or duplicated signal rebuilds the same
/// rows.
#[derive(Debug)]
pub struct ProductIndexProjection<S, K, P, ST, I> {
    spus: S,
    skus: K,
    prices: P,
    stocks: ST,
    index: I,
    settings: StockSettings,
}

impl<S, K, P, ST, I> ProductIndexProjection<S, K, P, ST, I>
where
    S: SpuStore,
    K: SkuStore,
    P: SkuPriceStore,
    ST: SkuStockStore,
    I: ProductIndexStore,
{
    pub fn new(spus: S, skus: K, prices: P, stocks: ST, index: I, settings: StockSettings) -> Self {
        Self { spus, skus, prices, stocks, index, settings }
    }

    pub fn apply(&self, event: &IndexEvent) -> DomainResult<()> {
        self.apply_at(event, Utc::now())
    }

    /// Apply a signal with an explicit clock (price windows are evaluated at
    /// `now`).
    pub fn apply_at(&self, event: &IndexEvent, now: DateTime<Utc>) -> DomainResult<()> {
        match *event {
            IndexEvent::Republish { spu_id } => self.rebuild_spu(spu_id, now),
            IndexEvent::Invalidate { spu_id } => {
                self.index.remove_by_spu(spu_id)?;
                Ok(())
            }
        }
    }

    fn rebuild_spu(&self, spu_id: SpuId, now: DateTime<Utc>) -> DomainResult<()> {
        // Rebuild from scratch so rows of disabled or deleted SKUs drop out.
        self.index.remove_by_spu(spu_id)?;

        let Some(spu) = self.spus.find(spu_id)? else {
            return Ok(());
        };
        if spu.deleted {
            return Ok(());
        }

        for sku in self
            .skus
            .find_by_spu(spu_id)?
            .into_iter()
            .filter(|sku| sku.is_active())
        {
            let entry = self.entry_for(&spu, &sku, now)?;
            self.index.upsert(entry)?;
        }
        Ok(())
    }

    fn entry_for(&self, spu: &Spu, sku: &Sku, now: DateTime<Utc>) -> DomainResult<ProductIndexEntry> {
        let prices = self.prices.find_by_sku(sku.id)?;
        let active: Vec<_> = prices.iter().filter(|price| price.is_active(now)).collect();

        let min_price = active
            .iter()
            .min_by_key(|price| price.amount.amount())
            .map(|price| price.amount.clone());
        let max_price = active
            .iter()
            .max_by_key(|price| price.amount.amount())
            .map(|price| price.amount.clone());

        let stock_status = match self.stocks.find_by_sku(sku.id)? {
            Some(stock) => stock.status(self.settings.low_stock_threshold),
            None => StockStatus::OutOfStock,
        };

        Ok(ProductIndexEntry {
            sku_id: sku.id,
            spu_id: spu.id,
            spu_name: spu.name.clone(),
            category_id: spu.category_id,
            min_price,
            max_price,
            stock_status,
            spu_deleted: spu.deleted,
            sku_enabled: sku.enabled,
        })
    }
}
