//! User directory: the admin surface over user records.
//!
//! Counter operations never go through this port; it backs the
//! user-management routes only.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drawer_core::{DomainError, DomainResult, StoreError, UserId};

/// A stored user record. The shared secret is deliberately not part of it;
/// it is returned exactly once, by `create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
}

impl NewUser {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> DomainResult<Self> {
        let (email, name) = validate(email.into(), name.into())?;
        Ok(Self { email, name })
    }
}

/// Validated replacement values for an existing user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub email: String,
    pub name: String,
}

impl UserUpdate {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> DomainResult<Self> {
        let (email, name) = validate(email.into(), name.into())?;
        Ok(Self { email, name })
    }
}

fn validate(email: String, name: String) -> DomainResult<(String, String)> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::invalid_input("invalid email format"));
    }
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(DomainError::invalid_input("name cannot be empty"));
    }
    Ok((email, name))
}

/// Create/update/delete of user records.
///
/// Email is unique across users; implementations report a collision as
/// `StoreError::Duplicate`.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Insert a user with the given shared secret, assigning a fresh id.
    async fn create(&self, user: NewUser, secret: String) -> Result<UserRecord, StoreError>;

    /// Replace email and name. `None` when no such user exists.
    async fn update(&self, id: UserId, update: UserUpdate)
    -> Result<Option<UserRecord>, StoreError>;

    /// `true` when a user was deleted.
    async fn remove(&self, id: UserId) -> Result<bool, StoreError>;
}
