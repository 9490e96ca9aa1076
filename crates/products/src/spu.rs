//! SPU aggregate and its lifecycle state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use freshmart_core::{CategoryId, DomainError, DomainResult, Entity, SpuId};

/// SPU lifecycle status.
///
/// Logical deletion is orthogonal (a flag on [`Spu`], valid from any status);
/// there is no terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpuStatus {
    Draft,
    Published,
    Unpublished,
}

impl SpuStatus {
    /// Allowed transitions: DRAFT→PUBLISHED, PUBLISHED→UNPUBLISHED,
    /// UNPUBLISHED→PUBLISHED. Self-transitions and every other pair are
    /// rejected.
    pub fn can_transition_to(self, target: SpuStatus) -> bool {
        if self == target {
            return false;
        }
        match self {
            SpuStatus::Draft => target == SpuStatus::Published,
            SpuStatus::Published => target == SpuStatus::Unpublished,
            SpuStatus::Unpublished => target == SpuStatus::Published,
        }
    }
}

impl core::fmt::Display for SpuStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            SpuStatus::Draft => "DRAFT",
            SpuStatus::Published => "PUBLISHED",
            SpuStatus::Unpublished => "UNPUBLISHED",
        };
        f.write_str(s)
    }
}

/// A product definition (name, category, images) independent of variant.
///
/// Owns its SKUs: deleting an SPU cascades a logical delete to every SKU (the
/// cascade itself runs in the service layer, which owns the stores).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spu {
    pub id: SpuId,
    pub name: String,
    /// Must reference a leaf category; gated by the category service.
    pub category_id: CategoryId,
    pub images: Vec<String>,
    pub status: SpuStatus,
    /// Stamped on every transition into PUBLISHED.
    pub publish_time: Option<DateTime<Utc>>,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Spu {
    pub fn new(
        name: impl Into<String>,
        category_id: CategoryId,
        images: Vec<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        Self::validate_name(&name)?;
        Ok(Self {
            id: SpuId::new(),
            name,
            category_id,
            images,
            status: SpuStatus::Draft,
            publish_time: None,
            deleted: false,
            deleted_at: None,
        })
    }

    pub fn validate_name(name: &str) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(DomainError::invalid_argument("spu name cannot be empty"));
        }
        if name.chars().count() > 200 {
            return Err(DomainError::invalid_argument("spu name exceeds 200 characters"));
        }
        Ok(())
    }

    /// DRAFT → PUBLISHED.
    pub fn publish(&mut self, has_enabled_sku: bool, now: DateTime<Utc>) -> DomainResult<()> {
        self.transition_to_published(has_enabled_sku, now)
    }

    /// UNPUBLISHED → PUBLISHED. Same gates as the first publish.
    pub fn republish(&mut self, has_enabled_sku: bool, now: DateTime<Utc>) -> DomainResult<()> {
        self.transition_to_published(has_enabled_sku, now)
    }

    /// PUBLISHED → UNPUBLISHED.
    pub fn unpublish(&mut self) -> DomainResult<()> {
        if self.deleted {
            return Err(DomainError::AlreadyDeleted);
        }
        if !self.status.can_transition_to(SpuStatus::Unpublished) {
            return Err(DomainError::invalid_transition(format!(
                "{} -> {}",
                self.status,
                SpuStatus::Unpublished
            )));
        }
        self.status = SpuStatus::Unpublished;
        Ok(())
    }

    fn transition_to_published(
        &mut self,
        has_enabled_sku: bool,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.deleted {
            return Err(DomainError::AlreadyDeleted);
        }
        if !has_enabled_sku {
            return Err(DomainError::NoEnabledSku);
        }
        if !self.status.can_transition_to(SpuStatus::Published) {
            return Err(DomainError::invalid_transition(format!(
                "{} -> {}",
                self.status,
                SpuStatus::Published
            )));
        }
        self.status = SpuStatus::Published;
        self.publish_time = Some(now);
        Ok(())
    }

    /// Logical delete; valid from any status.
    pub fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.deleted = true;
        self.deleted_at = Some(now);
    }
}

impl Entity for Spu {
    type Id = SpuId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
