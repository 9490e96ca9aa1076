//! Effective-price selection among possibly-overlapping windows.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use freshmart_core::SkuId;

use crate::money::Money;
use crate::price::SkuPrice;

/// Pick the effective record from one (SKU, channel)'s price records.
///
/// A record competes iff it is active at `now`; among active records the one
/// with the latest `start_time` wins. That tie-break is the authoritative
/// policy for overlapping windows, not an incidental ordering.
pub fn resolve(records: &[SkuPrice], now: DateTime<Utc>) -> Option<&SkuPrice> {
    records
        .iter()
        .filter(|record| record.is_active(now))
        .max_by_key(|record| record.start_time)
}

/// Batch resolution over records spanning multiple SKUs (one channel).
///
/// Applies the same per-SKU tie-break; SKUs with no active record are simply
/// omitted from the result rather than erroring.
pub fn resolve_batch(records: &[SkuPrice], now: DateTime<Utc>) -> HashMap<SkuId, Money> {
    let mut winners: HashMap<SkuId, &SkuPrice> = HashMap::new();

    for record in records.iter().filter(|record| record.is_active(now)) {
        winners
            .entry(record.sku_id)
            .and_modify(|current| {
                if record.start_time > current.start_time {
                    *current = record;
                }
            })
            .or_insert(record);
    }

    winners
        .into_iter()
        .map(|(sku_id, record)| (sku_id, record.amount.clone()))
        .collect()
}
