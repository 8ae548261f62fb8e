//! In-memory store implementations.
//!
//! A single mutex per store gives every call the same atomicity the
//! relational store provides per statement, which is all the engine
//! requires of a backend.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use drawer_auth::{CredentialStore, NewUser, UserDirectory, UserRecord, UserUpdate};
use drawer_core::{StoreError, UserId};
use drawer_inventory::{CounterStore, ItemCounter, ItemName};

fn lock<'a, T>(mutex: &'a Mutex<T>) -> Result<MutexGuard<'a, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
}

/// In-memory counter store.
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    rows: Mutex<HashMap<(UserId, String), i64>>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn list(&self, owner: UserId) -> Result<Vec<ItemCounter>, StoreError> {
        let rows = lock(&self.rows)?;
        let mut counters: Vec<ItemCounter> = rows
            .iter()
            .filter(|((user, _), _)| *user == owner)
            .map(|((_, item), count)| ItemCounter {
                item: item.clone(),
                count: *count,
            })
            .collect();
        counters.sort_by(|a, b| a.item.cmp(&b.item));
        Ok(counters)
    }

    async fn fetch(
        &self,
        owner: UserId,
        item: &ItemName,
    ) -> Result<Option<ItemCounter>, StoreError> {
        let rows = lock(&self.rows)?;
        Ok(rows
            .get(&(owner, item.as_str().to_string()))
            .map(|count| ItemCounter {
                item: item.as_str().to_string(),
                count: *count,
            }))
    }

    async fn insert(
        &self,
        owner: UserId,
        item: &ItemName,
        count: i64,
    ) -> Result<ItemCounter, StoreError> {
        let mut rows = lock(&self.rows)?;
        let key = (owner, item.as_str().to_string());
        if rows.contains_key(&key) {
            return Err(StoreError::Duplicate);
        }
        rows.insert(key, count);
        Ok(ItemCounter {
            item: item.as_str().to_string(),
            count,
        })
    }

    async fn add(
        &self,
        owner: UserId,
        item: &ItemName,
        delta: i64,
    ) -> Result<Option<ItemCounter>, StoreError> {
        let mut rows = lock(&self.rows)?;
        let key = (owner, item.as_str().to_string());
        let Some(count) = rows.get_mut(&key) else {
            return Ok(None);
        };
        *count += delta;
        let count = *count;
        Ok(Some(ItemCounter { item: key.1, count }))
    }

    async fn subtract_if_sufficient(
        &self,
        owner: UserId,
        item: &ItemName,
        delta: i64,
    ) -> Result<Option<ItemCounter>, StoreError> {
        let mut rows = lock(&self.rows)?;
        let key = (owner, item.as_str().to_string());
        let Some(count) = rows.get_mut(&key) else {
            return Ok(None);
        };
        if *count < delta {
            return Ok(None);
        }
        *count -= delta;
        let count = *count;
        Ok(Some(ItemCounter { item: key.1, count }))
    }

    async fn remove(&self, owner: UserId, item: &ItemName) -> Result<bool, StoreError> {
        let mut rows = lock(&self.rows)?;
        Ok(rows.remove(&(owner, item.as_str().to_string())).is_some())
    }

    async fn remove_all(&self, owner: UserId) -> Result<u64, StoreError> {
        let mut rows = lock(&self.rows)?;
        let before = rows.len();
        rows.retain(|(user, _), _| *user != owner);
        Ok((before - rows.len()) as u64)
    }
}

#[derive(Debug, Clone)]
struct StoredUser {
    email: String,
    name: String,
    secret: String,
    created_at: DateTime<Utc>,
}

/// In-memory user store, backing both the credential lookup and the user
/// admin surface so a user created through one is visible through the
/// other.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<UserId, StoredUser>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user with a known id and secret, bypassing the admin surface.
    pub fn seed_user(&self, id: UserId, email: &str, name: &str, secret: &str) {
        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        users.insert(
            id,
            StoredUser {
                email: email.to_string(),
                name: name.to_string(),
                secret: secret.to_string(),
                created_at: Utc::now(),
            },
        );
    }
}

#[async_trait]
impl CredentialStore for InMemoryUserStore {
    async fn find_secret(&self, user_id: UserId) -> Result<Option<String>, StoreError> {
        let users = lock(&self.users)?;
        Ok(users.get(&user_id).map(|u| u.secret.clone()))
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserStore {
    async fn create(&self, user: NewUser, secret: String) -> Result<UserRecord, StoreError> {
        let mut users = lock(&self.users)?;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate);
        }
        let id = UserId::new();
        let stored = StoredUser {
            email: user.email,
            name: user.name,
            secret,
            created_at: Utc::now(),
        };
        let record = UserRecord {
            id,
            email: stored.email.clone(),
            name: stored.name.clone(),
            created_at: stored.created_at,
        };
        users.insert(id, stored);
        Ok(record)
    }

    async fn update(
        &self,
        id: UserId,
        update: UserUpdate,
    ) -> Result<Option<UserRecord>, StoreError> {
        let mut users = lock(&self.users)?;
        if users
            .iter()
            .any(|(other, u)| *other != id && u.email == update.email)
        {
            return Err(StoreError::Duplicate);
        }
        let Some(stored) = users.get_mut(&id) else {
            return Ok(None);
        };
        stored.email = update.email;
        stored.name = update.name;
        Ok(Some(UserRecord {
            id,
            email: stored.email.clone(),
            name: stored.name.clone(),
            created_at: stored.created_at,
        }))
    }

    async fn remove(&self, id: UserId) -> Result<bool, StoreError> {
        let mut users = lock(&self.users)?;
        Ok(users.remove(&id).is_some())
    }
}
