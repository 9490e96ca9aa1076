//! `freshmart-pricing` — money, multi-channel price records and effective-price
//! resolution.

pub mod money;
pub mod price;
pub mod resolver;

pub use money::Money;
pub use price::{Channel, SkuPrice};
pub use resolver::{resolve, resolve_batch};
