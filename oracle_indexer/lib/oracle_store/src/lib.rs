//! The `EntityStore` collaborator contract and the per-invocation
//! `StoreCache` write-back layer that sits between it and the message
//! executors (§4.3).

mod entity_store;
mod store_cache;

pub use entity_store::{EntityStore, InMemoryEntityStore};
pub use store_cache::StoreCache;
