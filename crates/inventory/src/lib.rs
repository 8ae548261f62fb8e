//! Inventory counter domain.
//!
//! Business rules for per-user named counters, expressed against a storage
//! port. No IO, no HTTP, no SQL here.

pub mod counter;
pub mod engine;
pub mod store;

pub use counter::{ItemCounter, ItemName};
pub use engine::CounterEngine;
pub use store::CounterStore;
