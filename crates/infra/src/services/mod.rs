//! Domain services: orchestration of stores, pure domain logic and index
//! signaling.

pub mod attribute;
pub mod category;
pub mod price;
pub mod sku;
pub mod specification;
pub mod spu;
pub mod stock;

pub use attribute::AttributeService;
pub use category::CategoryService;
pub use price::PriceService;
pub use sku::SkuService;
pub use specification::SpecificationService;
pub use spu::SpuService;
pub use stock::StockService;
