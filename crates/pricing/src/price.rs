//! Time-bounded, per-channel price records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use freshmart_core::{DomainError, DomainResult, Entity, PriceId, SkuId};

use crate::money::Money;

/// A sales surface with independent pricing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Channel {
    App,
    Web,
    Store,
}

/// One price record for a (SKU, channel) pair.
///
/// Records are append-only: a price change creates a new record with its own
/// window and never mutates an existing one. Overlapping windows are allowed;
/// the resolver breaks ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuPrice {
    pub id: PriceId,
    pub sku_id: SkuId,
    pub channel: Channel,
    pub amount: Money,
    pub start_time: DateTime<Utc>,
    /// `None` means open-ended.
    pub end_time: Option<DateTime<Utc>>,
}

impl SkuPrice {
    pub fn new(
        sku_id: SkuId,
        channel: Channel,
        amount: Money,
        start_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        if !amount.is_positive() {
            return Err(DomainError::invalid_argument("price must be greater than zero"));
        }
        if let Some(end) = end_time {
            if end < start_time {
                return Err(DomainError::invalid_argument(
                    "price end time cannot precede start time",
                ));
            }
        }
        Ok(Self {
            id: PriceId::new(),
            sku_id,
            channel,
            amount,
            start_time,
            end_time,
        })
    }

    /// Active iff `start_time <= now` and the window has not closed
    /// (both bounds inclusive; `None` end means never closes).
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && self.end_time.is_none_or(|end| now <= end)
    }
}

impl Entity for SkuPrice {
    type Id = PriceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()
    }

    fn price(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> SkuPrice {
        SkuPrice::new(SkuId::new(), Channel::App, Money::of(Decimal::from(10)), start, end).unwrap()
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let err = SkuPrice::new(SkuId::new(), Channel::App, Money::zero(), at(0), None).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = SkuPrice::new(
            SkuId::new(),
            Channel::Web,
            Money::of(Decimal::ONE),
            at(10),
            Some(at(9)),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let p = price(at(9), Some(at(17)));
        assert!(p.is_active(at(9)));
        assert!(p.is_active(at(12)));
        assert!(p.is_active(at(17)));
        assert!(!p.is_active(at(8)));
        assert!(!p.is_active(at(18)));
    }

    #[test]
    fn open_ended_window_never_expires() {
        let p = price(at(9), None);
        assert!(!p.is_active(at(8)));
        assert!(p.is_active(at(23)));
    }
}
