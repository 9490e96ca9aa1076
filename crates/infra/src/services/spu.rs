//! SPU lifecycle orchestration.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use freshmart_core::{CategoryId, DomainError, DomainResult, SpuId};
use freshmart_events::{EventBus, IndexEvent};
use freshmart_products::Spu;

use crate::services::category::CategoryService;
use crate::store::{CategoryStore, SkuStore, SpuStore};

/// Drives SPU state changes: create/update (leaf-gated category), the
/// publish/unpublish/republish transitions, and cascading logical deletion.
///
/// Index signals are fire-and-forget: a failed publish to the bus is logged
/// and never rolls back the state change (the index is rebuildable).
#[derive(Debug)]
pub struct SpuService<S, K, C, B> {
    spus: S,
    skus: K,
    categories: CategoryService<C>,
    bus: B,
}

impl<S, K, C, B> SpuService<S, K, C, B>
where
    S: SpuStore,
    K: SkuStore,
    C: CategoryStore,
    B: EventBus<IndexEvent>,
{
    pub fn new(spus: S, skus: K, categories: CategoryService<C>, bus: B) -> Self {
        Self { spus, skus, categories, bus }
    }

    /// Create a draft SPU. The category must be a leaf.
    pub fn create_spu(
        &self,
        name: impl Into<String>,
        category_id: CategoryId,
        images: Vec<String>,
    ) -> DomainResult<SpuId> {
        self.categories.assert_leaf(category_id)?;

        let spu = Spu::new(name, category_id, images)?;
        let spu_id = spu.id;
        self.spus.insert(spu)?;

        info!(%spu_id, %category_id, "spu created");
        Ok(spu_id)
    }

    /// Partial update; a changed category is leaf-gated again.
    pub fn update_spu(
        &self,
        spu_id: SpuId,
        name: Option<String>,
        category_id: Option<CategoryId>,
        images: Option<Vec<String>>,
    ) -> DomainResult<()> {
        let mut spu = self.load(spu_id)?;
        if spu.deleted {
            return Err(DomainError::AlreadyDeleted);
        }

        if let Some(name) = name {
            Spu::validate_name(&name)?;
            spu.name = name;
        }
        if let Some(new_category) = category_id {
            if new_category != spu.category_id {
                self.categories.assert_leaf(new_category)?;
                spu.category_id = new_category;
            }
        }
        if let Some(images) = images {
            spu.images = images;
        }

        self.spus.update(&spu)?;
        info!(%spu_id, "spu updated");
        Ok(())
    }

    /// DRAFT → PUBLISHED, gated on an enabled SKU existing.
    pub fn publish(&self, spu_id: SpuId, now: DateTime<Utc>) -> DomainResult<()> {
        let mut spu = self.load(spu_id)?;
        let has_enabled_sku = self.skus.has_enabled(spu_id)?;

        spu.publish(has_enabled_sku, now)?;
        self.spus.update(&spu)?;
        self.signal(IndexEvent::Republish { spu_id });

        info!(%spu_id, publish_time = ?spu.publish_time, "spu published");
        Ok(())
    }

    /// PUBLISHED → UNPUBLISHED.
    pub fn unpublish(&self, spu_id: SpuId) -> DomainResult<()> {
        let mut spu = self.load(spu_id)?;

        spu.unpublish()?;
        self.spus.update(&spu)?;
        self.signal(IndexEvent::Invalidate { spu_id });

        info!(%spu_id, "spu unpublished");
        Ok(())
    }

    /// UNPUBLISHED → PUBLISHED, with the same SKU gate as the first publish.
    pub fn republish(&self, spu_id: SpuId, now: DateTime<Utc>) -> DomainResult<()> {
        let mut spu = self.load(spu_id)?;
        let has_enabled_sku = self.skus.has_enabled(spu_id)?;

        spu.republish(has_enabled_sku, now)?;
        self.spus.update(&spu)?;
        self.signal(IndexEvent::Republish { spu_id });

        info!(%spu_id, publish_time = ?spu.publish_time, "spu republished");
        Ok(())
    }

    /// Logical delete, cascading to every SKU of the SPU. Stock ledgers and
    /// price records of those SKUs are retained for audit/history.
    pub fn delete(&self, spu_id: SpuId, now: DateTime<Utc>) -> DomainResult<()> {
        let mut spu = self.load(spu_id)?;
        if spu.deleted {
            return Err(DomainError::AlreadyDeleted);
        }

        spu.mark_deleted(now);
        self.spus.update(&spu)?;

        let mut cascaded = 0u32;
        for mut sku in self
            .skus
            .find_by_spu(spu_id)?
            .into_iter()
            .filter(|sku| !sku.deleted)
        {
            sku.mark_deleted(now);
            self.skus.update(&sku)?;
            cascaded += 1;
        }

        self.signal(IndexEvent::Invalidate { spu_id });
        info!(%spu_id, cascaded, "spu deleted with sku cascade");
        Ok(())
    }

    /// The SPU as a live record (deleted SPUs read as not found).
    pub fn spu_detail(&self, spu_id: SpuId) -> DomainResult<Spu> {
        let spu = self.load(spu_id)?;
        if spu.deleted {
            return Err(DomainError::SpuNotFound);
        }
        Ok(spu)
    }

    fn load(&self, spu_id: SpuId) -> DomainResult<Spu> {
        self.spus.find(spu_id)?.ok_or(DomainError::SpuNotFound)
    }

    fn signal(&self, event: IndexEvent) {
        if let Err(err) = self.bus.publish(event) {
            warn!(?err, ?event, "failed to publish index signal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryCategoryStore, InMemorySkuStore, InMemorySpuStore};
    use freshmart_catalog::Specifications;
    use freshmart_events::{InMemoryEventBus, Subscription};
    use freshmart_products::{Sku, SpuStatus};
    use std::sync::Arc;

    struct Fixture {
        service: SpuService<
            Arc<InMemorySpuStore>,
            Arc<InMemorySkuStore>,
            Arc<InMemoryCategoryStore>,
            Arc<InMemoryEventBus<IndexEvent>>,
        >,
        spus: Arc<InMemorySpuStore>,
        skus: Arc<InMemorySkuStore>,
        categories: Arc<InMemoryCategoryStore>,
        signals: Subscription<IndexEvent>,
        category_id: CategoryId,
    }

    fn setup() -> Fixture {
        let spus = Arc::new(InMemorySpuStore::new());
        let skus = Arc::new(InMemorySkuStore::new());
        let categories = Arc::new(InMemoryCategoryStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let signals = bus.subscribe();

        let category_service = CategoryService::new(categories.clone());
        let category_id = category_service
            .create_category("fruit", "Fruit", None, 0)
            .unwrap();

        let service = SpuService::new(spus.clone(), skus.clone(), category_service, bus);
        Fixture { service, spus, skus, categories, signals, category_id }
    }

    fn add_sku(fixture: &Fixture, spu_id: SpuId) -> Sku {
        let sku = Sku::new(
            spu_id,
            format!("SKU-{}", SpuId::new()),
            Specifications::from_json(r#"{"weight": "1kg"}"#).unwrap(),
        )
        .unwrap();
        use crate::store::SkuStore as _;
        fixture.skus.insert(sku.clone()).unwrap();
        sku
    }

    #[test]
    fn create_requires_a_leaf_category() {
        let fixture = setup();

        let err = fixture
            .service
            .create_spu("Apples", CategoryId::new(), vec![])
            .unwrap_err();
        assert_eq!(err, DomainError::CategoryNotFound);

        // A child turns the category into a non-leaf.
        CategoryService::new(fixture.categories.clone())
            .create_category("citrus", "Citrus", Some(fixture.category_id), 0)
            .unwrap();
        let err = fixture
            .service
            .create_spu("Apples", fixture.category_id, vec![])
            .unwrap_err();
        assert_eq!(err, DomainError::CategoryNotLeaf);
    }

    #[test]
    fn publish_without_an_enabled_sku_fails() {
        let fixture = setup();
        let spu_id = fixture
            .service
            .create_spu("Apples", fixture.category_id, vec![])
            .unwrap();

        let err = fixture.service.publish(spu_id, Utc::now()).unwrap_err();
        assert_eq!(err, DomainError::NoEnabledSku);
    }

    #[test]
    fn publish_signals_an_index_republish() {
        let fixture = setup();
        let spu_id = fixture
            .service
            .create_spu("Apples", fixture.category_id, vec![])
            .unwrap();
        add_sku(&fixture, spu_id);

        fixture.service.publish(spu_id, Utc::now()).unwrap();

        use crate::store::SpuStore as _;
        let spu = fixture.spus.find(spu_id).unwrap().unwrap();
        assert_eq!(spu.status, SpuStatus::Published);
        assert_eq!(
            fixture.signals.try_recv().unwrap(),
            IndexEvent::Republish { spu_id }
        );
    }

    #[test]
    fn unpublish_signals_an_index_invalidate() {
        let fixture = setup();
        let spu_id = fixture
            .service
            .create_spu("Apples", fixture.category_id, vec![])
            .unwrap();
        add_sku(&fixture, spu_id);

        fixture.service.publish(spu_id, Utc::now()).unwrap();
        fixture.service.unpublish(spu_id).unwrap();

        let _republish = fixture.signals.try_recv().unwrap();
        assert_eq!(
            fixture.signals.try_recv().unwrap(),
            IndexEvent::Invalidate { spu_id }
        );
    }

    #[test]
    fn delete_cascades_to_skus() {
        let fixture = setup();
        let spu_id = fixture
            .service
            .create_spu("Apples", fixture.category_id, vec![])
            .unwrap();
        let sku = add_sku(&fixture, spu_id);

        fixture.service.delete(spu_id, Utc::now()).unwrap();

        use crate::store::SkuStore as _;
        let stored = fixture.skus.find(sku.id).unwrap().unwrap();
        assert!(stored.deleted);
        assert!(stored.deleted_at.is_some());

        let err = fixture.service.delete(spu_id, Utc::now()).unwrap_err();
        assert_eq!(err, DomainError::AlreadyDeleted);
    }

    #[test]
    fn deleted_spus_reject_transitions() {
        let fixture = setup();
        let spu_id = fixture
            .service
            .create_spu("Apples", fixture.category_id, vec![])
            .unwrap();
        add_sku(&fixture, spu_id);
        fixture.service.delete(spu_id, Utc::now()).unwrap();

        let err = fixture.service.publish(spu_id, Utc::now()).unwrap_err();
        assert_eq!(err, DomainError::AlreadyDeleted);
        let err = fixture.service.spu_detail(spu_id).unwrap_err();
        assert_eq!(err, DomainError::SpuNotFound);
    }
}
