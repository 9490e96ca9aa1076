//! Pricing orchestration.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::info;

use freshmart_core::{DomainError, DomainResult, PriceId, SkuId};
use freshmart_pricing::{Channel, Money, SkuPrice, resolve, resolve_batch};

use crate::store::{SkuPriceStore, SkuStore};

/// Price setting and effective-price resolution over the price store.
///
/// Resolution is pure (`freshmart_pricing::resolver`); this service only
/// fetches the records for the (SKU, channel) pair and maps "no winner" to
/// [`DomainError::PriceNotFound`].
#[derive(Debug)]
pub struct PriceService<P, K> {
    prices: P,
    skus: K,
}

impl<P: SkuPriceStore, K: SkuStore> PriceService<P, K> {
    pub fn new(prices: P, skus: K) -> Self {
        Self { prices, skus }
    }

    /// Append a new price record. A price change never mutates an existing
    /// record; the resolver's tie-break decides which record is effective.
    pub fn set_sku_price(
        &self,
        sku_id: SkuId,
        channel: Channel,
        amount: Money,
        start_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
    ) -> DomainResult<PriceId> {
        let sku = self.skus.find(sku_id)?.ok_or(DomainError::SkuNotFound)?;
        if sku.deleted {
            return Err(DomainError::SkuNotFound);
        }

        let price = SkuPrice::new(sku_id, channel, amount, start_time, end_time)?;
        let price_id = price.id;
        self.prices.append(price)?;

        info!(%sku_id, ?channel, %price_id, "price record appended");
        Ok(price_id)
    }

    /// The effective price for (SKU, channel) at `now`.
    pub fn resolve(&self, sku_id: SkuId, channel: Channel, now: DateTime<Utc>) -> DomainResult<Money> {
        let records = self.prices.find_by_sku_and_channel(sku_id, channel)?;
        resolve(&records, now)
            .map(|record| record.amount.clone())
            .ok_or(DomainError::PriceNotFound)
    }

    /// Effective prices for many SKUs on one channel. SKUs without an active
    /// price are omitted rather than erroring.
    pub fn resolve_batch(
        &self,
        sku_ids: &[SkuId],
        channel: Channel,
        now: DateTime<Utc>,
    ) -> DomainResult<HashMap<SkuId, Money>> {
        if sku_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let records = self.prices.find_by_skus_and_channel(sku_ids, channel)?;
        Ok(resolve_batch(&records, now))
    }
}
