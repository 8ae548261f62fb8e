use std::sync::Arc;

use drawer_core::{DomainError, DomainResult, StoreError, UserId};

use crate::counter::{ItemCounter, ItemName};
use crate::store::CounterStore;

/// The counter state machine: guarded transitions on a single integer
/// value per (owner, item) pair.
///
/// All coordination for shared state is delegated to the store's atomic
/// primitives; operations on the same pair are linearized by the store's
/// conditioned update, not by anything in this process.
pub struct CounterEngine {
    store: Arc<dyn CounterStore>,
}

impl CounterEngine {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    pub async fn list_all(&self, owner: UserId) -> DomainResult<Vec<ItemCounter>> {
        Ok(self.store.list(owner).await?)
    }

    pub async fn get(&self, owner: UserId, item: &ItemName) -> DomainResult<ItemCounter> {
        self.store
            .fetch(owner, item)
            .await?
            .ok_or(DomainError::NotFound)
    }

    /// Create a new counter with the given initial count.
    ///
    /// The insert itself is the existence check: two concurrent creates for
    /// the same (owner, item) race on the store's uniqueness constraint and
    /// the loser gets `Conflict`. There is no separate pre-check.
    pub async fn create(
        &self,
        owner: UserId,
        item: &ItemName,
        count: i64,
    ) -> DomainResult<ItemCounter> {
        let count = non_negative(count, "count")?;
        match self.store.insert(owner, item, count).await {
            Ok(counter) => Ok(counter),
            Err(StoreError::Duplicate) => Err(DomainError::conflict("item already exists")),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn add(
        &self,
        owner: UserId,
        item: &ItemName,
        delta: i64,
    ) -> DomainResult<ItemCounter> {
        let delta = non_negative(delta, "count")?;
        self.store
            .add(owner, item, delta)
            .await?
            .ok_or(DomainError::NotFound)
    }

    /// Decrement, refusing to drive the count negative.
    ///
    /// Sufficiency is checked by the store atomically with the write. When
    /// the conditioned update matches no row, one follow-up read splits
    /// "no such item" from "present but insufficient".
    pub async fn subtract(
        &self,
        owner: UserId,
        item: &ItemName,
        delta: i64,
    ) -> DomainResult<ItemCounter> {
        let delta = non_negative(delta, "count")?;
        if let Some(counter) = self.store.subtract_if_sufficient(owner, item, delta).await? {
            return Ok(counter);
        }

        match self.store.fetch(owner, item).await? {
            Some(counter) => Err(DomainError::insufficient_stock(delta, counter.count)),
            None => Err(DomainError::NotFound),
        }
    }

    pub async fn delete(&self, owner: UserId, item: &ItemName) -> DomainResult<()> {
        if self.store.remove(owner, item).await? {
            Ok(())
        } else {
            Err(DomainError::NotFound)
        }
    }

    /// Remove every counter owned by `owner`. Removing zero rows is still
    /// success; this operation is idempotent.
    pub async fn delete_all(&self, owner: UserId) -> DomainResult<()> {
        self.store.remove_all(owner).await?;
        Ok(())
    }
}

fn non_negative(value: i64, what: &str) -> DomainResult<i64> {
    if value < 0 {
        return Err(DomainError::invalid_input(format!(
            "{what} must be a non-negative integer"
        )));
    }
    Ok(value)
}
