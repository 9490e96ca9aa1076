//! `freshmart-products` — SPU definitions, their lifecycle state machine, and
//! SKU variants.

pub mod sku;
pub mod spu;

pub use sku::Sku;
pub use spu::{Spu, SpuStatus};
