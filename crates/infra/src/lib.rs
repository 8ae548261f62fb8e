//! Store adapters for the drawer service.
//!
//! The Postgres implementations are the system of record; the in-memory
//! implementations back tests and local experiments with the same per-call
//! atomicity guarantees.

pub mod memory;
pub mod postgres;

#[cfg(test)]
mod integration_tests;

pub use memory::{InMemoryCounterStore, InMemoryUserStore};
pub use postgres::{MIGRATOR, PostgresCounterStore, PostgresUserStore};
