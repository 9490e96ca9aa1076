//! `freshmart-inventory` — the per-SKU stock ledger.

pub mod stock;

pub use stock::{SkuStock, StockStatus};
