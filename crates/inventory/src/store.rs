use async_trait::async_trait;

use drawer_core::{StoreError, UserId};

use crate::counter::{ItemCounter, ItemName};

/// Persistence port for counters.
///
/// Implementations must provide per-call atomicity: `insert` relies on the
/// store's (owner, item) uniqueness constraint, and `subtract_if_sufficient`
/// must evaluate its predicate atomically with the write. The engine holds
/// no locks of its own.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// All counters for `owner`. Order is unspecified but stable within a
    /// call.
    async fn list(&self, owner: UserId) -> Result<Vec<ItemCounter>, StoreError>;

    async fn fetch(
        &self,
        owner: UserId,
        item: &ItemName,
    ) -> Result<Option<ItemCounter>, StoreError>;

    /// Insert a new counter. A uniqueness violation is reported as
    /// `StoreError::Duplicate`, not a generic failure.
    async fn insert(
        &self,
        owner: UserId,
        item: &ItemName,
        count: i64,
    ) -> Result<ItemCounter, StoreError>;

    /// `count += delta` on an existing row. `None` when no row matched.
    async fn add(
        &self,
        owner: UserId,
        item: &ItemName,
        delta: i64,
    ) -> Result<Option<ItemCounter>, StoreError>;

    /// Conditioned decrement: `count -= delta` only where `count >= delta`,
    /// the predicate evaluated atomically with the write. `None` when no
    /// row matched (absent or insufficient; callers disambiguate).
    async fn subtract_if_sufficient(
        &self,
        owner: UserId,
        item: &ItemName,
        delta: i64,
    ) -> Result<Option<ItemCounter>, StoreError>;

    /// `true` when a row was deleted.
    async fn remove(&self, owner: UserId, item: &ItemName) -> Result<bool, StoreError>;

    /// Delete every counter for `owner`; returns the number of rows removed.
    async fn remove_all(&self, owner: UserId) -> Result<u64, StoreError>;
}
