//! `freshmart-events` — notification plumbing between the catalog core and
//! the search-index projection.

pub mod bus;
pub mod in_memory_bus;
pub mod index;

pub use bus::{EventBus, Subscription};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use index::IndexEvent;
