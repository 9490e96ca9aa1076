//! SKU aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use freshmart_catalog::Specifications;
use freshmart_core::{DomainError, DomainResult, Entity, SkuId, SpuId};

/// A sellable variant of an SPU.
///
/// Carries the variant's specification values (validated against the SPU's
/// category schema at creation/update by the service layer). Exactly one
/// zero-quantity stock ledger is created alongside each SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sku {
    pub id: SkuId,
    pub spu_id: SpuId,
    /// Unique, human-assigned code.
    pub code: String,
    pub specifications: Specifications,
    pub enabled: bool,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Sku {
    /// New SKUs start enabled.
    pub fn new(
        spu_id: SpuId,
        code: impl Into<String>,
        specifications: Specifications,
    ) -> DomainResult<Self> {
        let code = code.into();
        Self::validate_code(&code)?;
        Ok(Self {
            id: SkuId::new(),
            spu_id,
            code,
            specifications,
            enabled: true,
            deleted: false,
            deleted_at: None,
        })
    }

    pub fn validate_code(code: &str) -> DomainResult<()> {
        if code.trim().is_empty() {
            return Err(DomainError::invalid_argument("sku code cannot be empty"));
        }
        Ok(())
    }

    pub fn enable(&mut self) -> DomainResult<()> {
        if self.deleted {
            return Err(DomainError::AlreadyDeleted);
        }
        self.enabled = true;
        Ok(())
    }

    pub fn disable(&mut self) -> DomainResult<()> {
        if self.deleted {
            return Err(DomainError::AlreadyDeleted);
        }
        self.enabled = false;
        Ok(())
    }

    /// Logical delete. Stock and price records of the SKU are retained.
    pub fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.deleted = true;
        self.deleted_at = Some(now);
    }

    /// Enabled and not deleted — the condition that gates SPU publishing.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.deleted
    }
}

impl Entity for Sku {
    type Id = SkuId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> Specifications {
        Specifications::from_json(r#"{"weight": "500g"}"#).unwrap()
    }

    #[test]
    fn new_skus_start_enabled() {
        let sku = Sku::new(SpuId::new(), "APL-GALA-1KG", specs()).unwrap();
        assert!(sku.enabled);
        assert!(sku.is_active());
    }

    #[test]
    fn empty_code_is_rejected() {
        let err = Sku::new(SpuId::new(), " ", specs()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn disable_and_enable_toggle_activity() {
        let mut sku = Sku::new(SpuId::new(), "APL-GALA-1KG", specs()).unwrap();
        sku.disable().unwrap();
        assert!(!sku.is_active());
        sku.enable().unwrap();
        assert!(sku.is_active());
    }

    #[test]
    fn deleted_skus_cannot_be_toggled() {
        let mut sku = Sku::new(SpuId::new(), "APL-GALA-1KG", specs()).unwrap();
        sku.mark_deleted(Utc::now());

        assert_eq!(sku.enable().unwrap_err(), DomainError::AlreadyDeleted);
        assert_eq!(sku.disable().unwrap_err(), DomainError::AlreadyDeleted);
        assert!(!sku.is_active());
        assert!(sku.deleted_at.is_some());
    }
}
