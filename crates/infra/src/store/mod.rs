//! Persistence collaborators: trait contracts + in-memory implementations.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::{
    InMemoryAttributeStore, InMemoryCategoryAttributeStore, InMemoryCategoryStore,
    InMemorySkuPriceStore, InMemorySkuStockStore, InMemorySkuStore, InMemorySpuStore,
};
pub use r#trait::{
    AttributeStore, CategoryAttributeStore, CategoryStore, SkuPriceStore, SkuStockStore, SkuStore,
    SpuStore, StoreError,
};
