//! Search-index notification messages.

use serde::{Deserialize, Serialize};

use freshmart_core::SpuId;

/// Fire-and-forget signal asking the search-index projection to refresh the
/// rows of one SPU.
///
/// The core publishes these after lifecycle changes and never waits for the
/// projection; a missed signal is repaired by the next rebuild.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndexEvent {
    /// Rebuild the index rows for every enabled SKU of the SPU.
    Republish { spu_id: SpuId },
    /// Drop the index rows of the SPU (unpublished or deleted).
    Invalidate { spu_id: SpuId },
}
