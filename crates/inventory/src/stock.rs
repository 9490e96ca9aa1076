//! Per-SKU stock ledger.

use serde::{Deserialize, Serialize};

use freshmart_core::{DomainError, DomainResult, SkuId};

/// Derived availability classification of a ledger.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Classify an available quantity against a configured low-stock
    /// threshold. `available == threshold` already counts as in stock.
    pub fn classify(available: u32, low_stock_threshold: u32) -> Self {
        if available == 0 {
            StockStatus::OutOfStock
        } else if available < low_stock_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// The stock ledger of one SKU.
///
/// Tracks three quantities under the invariant
/// `total == available + locked`, re-checked after every mutation. A
/// violation is a bug in the ledger and is reported, never silently
/// corrected. Quantities are unsigned, so negative stock is unrepresentable.
///
/// The `version` counter belongs to the persistence discipline: the store
/// accepts a write only if the stored version still matches the version read
/// at the start of the operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuStock {
    pub sku_id: SkuId,
    total: u32,
    available: u32,
    locked: u32,
    version: u64,
}

impl SkuStock {
    /// Fresh ledger: everything available, nothing locked, version 0.
    pub fn initialize(sku_id: SkuId, total: u32) -> Self {
        Self {
            sku_id,
            total,
            available: total,
            locked: 0,
            version: 0,
        }
    }

    /// Rehydrate a ledger from stored quantities, re-checking the invariant.
    pub fn from_parts(
        sku_id: SkuId,
        total: u32,
        available: u32,
        locked: u32,
        version: u64,
    ) -> DomainResult<Self> {
        let stock = Self {
            sku_id,
            total,
            available,
            locked,
            version,
        };
        stock.assert_invariant()?;
        Ok(stock)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn available(&self) -> u32 {
        self.available
    }

    pub fn locked(&self) -> u32 {
        self.locked
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Copy of this ledger at a different persisted version. Only stores
    /// should need this.
    pub fn at_version(&self, version: u64) -> Self {
        Self { version, ..self.clone() }
    }

    /// Move quantity from available to locked (a reservation).
    pub fn reserve(&mut self, quantity: u32) -> DomainResult<()> {
        validate_quantity(quantity)?;
        if self.available < quantity {
            return Err(DomainError::insufficient_stock(format!(
                "available {} < requested {}",
                self.available, quantity
            )));
        }
        self.available -= quantity;
        self.locked += quantity;
        self.assert_invariant()
    }

    /// Consume locked quantity for good (reservation fulfilled).
    pub fn commit(&mut self, quantity: u32) -> DomainResult<()> {
        validate_quantity(quantity)?;
        if self.locked < quantity {
            return Err(DomainError::insufficient_stock(format!(
                "locked {} < requested {}",
                self.locked, quantity
            )));
        }
        self.total -= quantity;
        self.locked -= quantity;
        self.assert_invariant()
    }

    /// Return locked quantity to available (reservation abandoned).
    pub fn release(&mut self, quantity: u32) -> DomainResult<()> {
        validate_quantity(quantity)?;
        if self.locked < quantity {
            return Err(DomainError::insufficient_stock(format!(
                "locked {} < requested {}",
                self.locked, quantity
            )));
        }
        self.locked -= quantity;
        self.available += quantity;
        self.assert_invariant()
    }

    pub fn has_available(&self, quantity: u32) -> bool {
        self.available >= quantity
    }

    pub fn status(&self, low_stock_threshold: u32) -> StockStatus {
        StockStatus::classify(self.available, low_stock_threshold)
    }

    /// `total == available + locked`, the ledger's defining invariant.
    pub fn assert_invariant(&self) -> DomainResult<()> {
        if u64::from(self.total) != u64::from(self.available) + u64::from(self.locked) {
            return Err(DomainError::invariant(format!(
                "stock ledger inconsistent for sku {}: total {} != available {} + locked {}",
                self.sku_id, self.total, self.available, self.locked
            )));
        }
        Ok(())
    }
}

fn validate_quantity(quantity: u32) -> DomainResult<()> {
    if quantity == 0 {
        return Err(DomainError::invalid_argument("quantity must be greater than zero"));
    }
    Ok(())
}
