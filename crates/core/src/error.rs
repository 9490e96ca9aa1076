//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Business-rule rejections and not-found failures surface to the caller
/// unchanged. `InvariantViolation` indicates a bug in the ledger or an
/// aggregate and must never be swallowed or auto-repaired.
/// `ConcurrencyExhausted` is the only transient variant; it is produced by
/// the service layer after the optimistic-lock retry ceiling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed input (caller's fault, never retried).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("category not found")]
    CategoryNotFound,

    #[error("attribute not found")]
    AttributeNotFound,

    #[error("spu not found")]
    SpuNotFound,

    #[error("sku not found")]
    SkuNotFound,

    #[error("stock record not found")]
    StockNotFound,

    /// No price record is active for the requested channel and instant.
    #[error("no active price")]
    PriceNotFound,

    /// Available (or locked) quantity cannot cover the requested quantity.
    #[error("insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("required attribute missing: {0}")]
    RequiredAttributeMissing(String),

    #[error("attribute '{attribute}' value invalid: {reason}")]
    AttributeValueInvalid { attribute: String, reason: String },

    #[error("invalid status transition: {0}")]
    InvalidStatusTransition(String),

    /// Publish requires at least one enabled, non-deleted SKU.
    #[error("spu has no enabled sku")]
    NoEnabledSku,

    /// SPUs may only reference leaf categories.
    #[error("category is not a leaf")]
    CategoryNotLeaf,

    #[error("already deleted")]
    AlreadyDeleted,

    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// A ledger or aggregate invariant no longer holds (fatal; indicates a bug).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Version-conflict retries hit the ceiling without a successful write.
    #[error("optimistic concurrency retries exhausted: {0}")]
    ConcurrencyExhausted(String),
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn insufficient_stock(msg: impl Into<String>) -> Self {
        Self::InsufficientStock(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStatusTransition(msg.into())
    }

    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::AlreadyExists(msg.into())
    }

    pub fn value_invalid(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AttributeValueInvalid {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    pub fn exhausted(msg: impl Into<String>) -> Self {
        Self::ConcurrencyExhausted(msg.into())
    }
}
