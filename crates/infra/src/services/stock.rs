//! Stock ledger orchestration: read-mutate-CAS-write with bounded retry.

use tracing::{error, info, warn};

use freshmart_core::{DomainError, DomainResult, SkuId};
use freshmart_inventory::{SkuStock, StockStatus};

use crate::settings::StockSettings;
use crate::store::SkuStockStore;

/// Service wrapping a [`SkuStockStore`] with the optimistic-lock retry loop.
///
/// Each mutation re-reads the ledger, applies the logical operation against
/// the fresh state and attempts a versioned write. A rejected write (version
/// conflict) backs off and retries the *operation*, never the stale values.
/// Business-rule failures are returned immediately — only conflicts retry.
#[derive(Debug)]
pub struct StockService<S> {
    store: S,
    settings: StockSettings,
}

impl<S: SkuStockStore> StockService<S> {
    pub fn new(store: S, settings: StockSettings) -> Self {
        Self { store, settings }
    }

    /// Create the ledger for a SKU with everything available.
    pub fn init_stock(&self, sku_id: SkuId, total: u32) -> DomainResult<()> {
        if self.store.exists(sku_id)? {
            return Err(DomainError::already_exists(format!(
                "stock ledger for sku {sku_id}"
            )));
        }
        self.store.insert(SkuStock::initialize(sku_id, total))?;
        info!(%sku_id, total, "stock ledger initialized");
        Ok(())
    }

    /// Move quantity from available to locked.
    pub fn reserve(&self, sku_id: SkuId, quantity: u32) -> DomainResult<()> {
        self.mutate(sku_id, quantity, "reserve", |stock| stock.reserve(quantity))
    }

    /// Consume locked quantity for good.
    pub fn commit(&self, sku_id: SkuId, quantity: u32) -> DomainResult<()> {
        self.mutate(sku_id, quantity, "commit", |stock| stock.commit(quantity))
    }

    /// Return locked quantity to available.
    pub fn release(&self, sku_id: SkuId, quantity: u32) -> DomainResult<()> {
        self.mutate(sku_id, quantity, "release", |stock| stock.release(quantity))
    }

    pub fn available_stock(&self, sku_id: SkuId) -> DomainResult<u32> {
        Ok(self.load(sku_id)?.available())
    }

    /// Availability classification using the configured low-stock threshold.
    pub fn stock_status(&self, sku_id: SkuId) -> DomainResult<StockStatus> {
        Ok(self.load(sku_id)?.status(self.settings.low_stock_threshold))
    }

    fn load(&self, sku_id: SkuId) -> DomainResult<SkuStock> {
        self.store
            .find_by_sku(sku_id)?
            .ok_or(DomainError::StockNotFound)
    }

    fn mutate(
        &self,
        sku_id: SkuId,
        quantity: u32,
        op: &'static str,
        apply: impl Fn(&mut SkuStock) -> DomainResult<()>,
    ) -> DomainResult<()> {
        let max_attempts = self.settings.retry.max_attempts;

        for attempt in 1..=max_attempts {
            let mut stock = self.load(sku_id)?;
            let expected_version = stock.version();

            match apply(&mut stock) {
                Ok(()) => {}
                Err(err @ DomainError::InvariantViolation(_)) => {
                    // Fatal: report, never repair.
                    error!(%sku_id, op, %err, "stock ledger invariant violated");
                    return Err(err);
                }
                // Business-rule failures (insufficient stock, bad quantity)
                // are never retried.
                Err(err) => return Err(err),
            }

            if self.store.update(&stock, expected_version)? {
                info!(%sku_id, op, quantity, attempt, "stock operation applied");
                return Ok(());
            }

            if attempt < max_attempts {
                let backoff = self.settings.retry.backoff(attempt);
                warn!(
                    %sku_id,
                    op,
                    attempt,
                    backoff_ms = backoff.as_millis() as u64,
                    "stock version conflict, retrying"
                );
                std::thread::sleep(backoff);
            }
        }

        Err(DomainError::exhausted(format!(
            "{op} of {quantity} on sku {sku_id} failed after {max_attempts} attempts"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemorySkuStockStore, StoreError};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn service() -> StockService<InMemorySkuStockStore> {
        StockService::new(InMemorySkuStockStore::new(), StockSettings::default())
    }

    /// Store wrapper that rejects the first `conflicts` versioned writes,
    /// simulating concurrent writers racing this one.
    struct ConflictingStore {
        inner: InMemorySkuStockStore,
        conflicts: AtomicU32,
    }

    impl ConflictingStore {
        fn new(conflicts: u32) -> Self {
            Self {
                inner: InMemorySkuStockStore::new(),
                conflicts: AtomicU32::new(conflicts),
            }
        }
    }

    impl SkuStockStore for ConflictingStore {
        fn insert(&self, stock: SkuStock) -> Result<(), StoreError> {
            self.inner.insert(stock)
        }

        fn find_by_sku(&self, sku_id: SkuId) -> Result<Option<SkuStock>, StoreError> {
            self.inner.find_by_sku(sku_id)
        }

        fn exists(&self, sku_id: SkuId) -> Result<bool, StoreError> {
            self.inner.exists(sku_id)
        }

        fn update(&self, stock: &SkuStock, expected_version: u64) -> Result<bool, StoreError> {
            let remaining = self.conflicts.load(Ordering::SeqCst);
            if remaining > 0 {
                self.conflicts.store(remaining - 1, Ordering::SeqCst);
                return Ok(false);
            }
            self.inner.update(stock, expected_version)
        }
    }

    fn fast_settings() -> StockSettings {
        StockSettings {
            retry: crate::settings::RetryPolicy {
                max_attempts: 3,
                base_delay_ms: 1,
            },
            ..StockSettings::default()
        }
    }

    #[test]
    fn init_creates_a_fully_available_ledger() {
        let service = service();
        let sku_id = SkuId::new();
        service.init_stock(sku_id, 100).unwrap();
        assert_eq!(service.available_stock(sku_id).unwrap(), 100);
    }

    #[test]
    fn init_twice_is_already_exists() {
        let service = service();
        let sku_id = SkuId::new();
        service.init_stock(sku_id, 10).unwrap();

        let err = service.init_stock(sku_id, 10).unwrap_err();
        assert!(matches!(err, DomainError::AlreadyExists(_)));
    }

    #[test]
    fn operations_on_a_missing_ledger_are_stock_not_found() {
        let service = service();
        let err = service.reserve(SkuId::new(), 1).unwrap_err();
        assert_eq!(err, DomainError::StockNotFound);
    }

    #[test]
    fn insufficient_stock_surfaces_without_retry() {
        // A conflicting store would turn retries into visible sleep; the
        // plain store proves the error path skips the retry loop entirely.
        let service = service();
        let sku_id = SkuId::new();
        service.init_stock(sku_id, 5).unwrap();

        let err = service.reserve(sku_id, 6).unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock(_)));
        assert_eq!(service.available_stock(sku_id).unwrap(), 5);
    }

    #[test]
    fn version_conflicts_are_retried_until_the_write_lands() {
        let store = ConflictingStore::new(2);
        let service = StockService::new(store, fast_settings());
        let sku_id = SkuId::new();
        service.init_stock(sku_id, 50).unwrap();

        // Two conflicts, then the third attempt succeeds.
        service.reserve(sku_id, 20).unwrap();
        assert_eq!(service.available_stock(sku_id).unwrap(), 30);
    }

    #[test]
    fn exhausting_the_retry_ceiling_is_concurrency_exhausted() {
        let store = ConflictingStore::new(u32::MAX);
        let service = StockService::new(store, fast_settings());
        let sku_id = SkuId::new();
        service.init_stock(sku_id, 50).unwrap();

        let err = service.reserve(sku_id, 20).unwrap_err();
        assert!(matches!(err, DomainError::ConcurrencyExhausted(_)));
        // The ledger is untouched.
        assert_eq!(service.available_stock(sku_id).unwrap(), 50);
    }

    #[test]
    fn stock_status_uses_the_configured_threshold() {
        let settings = StockSettings {
            low_stock_threshold: 20,
            ..StockSettings::default()
        };
        let service = StockService::new(InMemorySkuStockStore::new(), settings);
        let sku_id = SkuId::new();
        service.init_stock(sku_id, 15).unwrap();

        assert_eq!(service.stock_status(sku_id).unwrap(), StockStatus::LowStock);
    }
}
