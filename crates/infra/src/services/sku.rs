//! SKU orchestration.

use tracing::{info, warn};

use freshmart_catalog::Specifications;
use freshmart_core::{DomainError, DomainResult, SkuId, SpuId};
use freshmart_events::{EventBus, IndexEvent};
use freshmart_inventory::SkuStock;
use freshmart_products::Sku;

use crate::services::specification::SpecificationService;
use crate::store::{AttributeStore, CategoryAttributeStore, SkuStockStore, SkuStore, SpuStore};

/// SKU creation and state changes.
///
/// Creation validates the SPU reference, SKU code uniqueness and the
/// specification map against the SPU's category schema, then writes the SKU
/// together with its one zero-quantity stock ledger.
#[derive(Debug)]
pub struct SkuService<K, S, ST, A, CA, B> {
    skus: K,
    spus: S,
    stocks: ST,
    specifications: SpecificationService<A, CA>,
    bus: B,
}

impl<K, S, ST, A, CA, B> SkuService<K, S, ST, A, CA, B>
where
    K: SkuStore,
    S: SpuStore,
    ST: SkuStockStore,
    A: AttributeStore,
    CA: CategoryAttributeStore,
    B: EventBus<IndexEvent>,
{
    pub fn new(
        skus: K,
        spus: S,
        stocks: ST,
        specifications: SpecificationService<A, CA>,
        bus: B,
    ) -> Self {
        Self { skus, spus, stocks, specifications, bus }
    }

    pub fn create_sku(
        &self,
        spu_id: SpuId,
        code: impl Into<String>,
        specifications: Specifications,
    ) -> DomainResult<SkuId> {
        let code = code.into();
        Sku::validate_code(&code)?;

        let spu = self.spus.find(spu_id)?.ok_or(DomainError::SpuNotFound)?;
        if spu.deleted {
            return Err(DomainError::SpuNotFound);
        }
        if self.skus.exists_code(&code)? {
            return Err(DomainError::already_exists(format!("sku code '{code}'")));
        }

        self.specifications.validate(spu.category_id, &specifications)?;

        let sku = Sku::new(spu_id, code, specifications)?;
        let sku_id = sku.id;
        self.skus.insert(sku)?;
        // Exactly one ledger per SKU, created with it at zero quantities.
        self.stocks.insert(SkuStock::initialize(sku_id, 0))?;

        info!(%sku_id, %spu_id, "sku created");
        Ok(sku_id)
    }

    /// Replace the specification map after re-validating it against the SPU's
    /// category schema.
    pub fn update_specifications(
        &self,
        sku_id: SkuId,
        specifications: Specifications,
    ) -> DomainResult<()> {
        let mut sku = self.load(sku_id)?;
        if sku.deleted {
            return Err(DomainError::AlreadyDeleted);
        }
        let spu = self.spus.find(sku.spu_id)?.ok_or(DomainError::SpuNotFound)?;

        self.specifications.validate(spu.category_id, &specifications)?;
        sku.specifications = specifications;
        self.skus.update(&sku)?;
        self.signal(IndexEvent::Republish { spu_id: sku.spu_id });

        info!(%sku_id, "sku specifications updated");
        Ok(())
    }

    pub fn enable(&self, sku_id: SkuId) -> DomainResult<()> {
        self.toggle(sku_id, true)
    }

    pub fn disable(&self, sku_id: SkuId) -> DomainResult<()> {
        self.toggle(sku_id, false)
    }

    fn toggle(&self, sku_id: SkuId, enabled: bool) -> DomainResult<()> {
        let mut sku = self.load(sku_id)?;
        if enabled {
            sku.enable()?;
        } else {
            sku.disable()?;
        }
        self.skus.update(&sku)?;
        // The index drops rows of disabled SKUs on the next rebuild.
        self.signal(IndexEvent::Republish { spu_id: sku.spu_id });

        info!(%sku_id, enabled, "sku toggled");
        Ok(())
    }

    fn load(&self, sku_id: SkuId) -> DomainResult<Sku> {
        self.skus.find(sku_id)?.ok_or(DomainError::SkuNotFound)
    }

    fn signal(&self, event: IndexEvent) {
        if let Err(err) = self.bus.publish(event) {
            warn!(?err, ?event, "failed to publish index signal");
        }
    }
}
