//! Read-model projections fed by index signals.

pub mod product_index;

pub use product_index::{
    InMemoryProductIndexStore, ProductIndexEntry, ProductIndexProjection, ProductIndexStore,
};
