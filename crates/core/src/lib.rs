//! `drawer-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure
//! concerns): the error taxonomy and strongly-typed identifiers.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult, StoreError};
pub use id::UserId;
