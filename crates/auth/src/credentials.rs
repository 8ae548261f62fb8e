use async_trait::async_trait;

use drawer_core::{StoreError, UserId};

/// Read-only lookup of a user's shared secret.
///
/// Returns the stored secret rather than a match verdict; the comparison
/// (and its indistinguishability rule) lives in the
/// [`Authenticator`](crate::Authenticator).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// The stored secret for `user_id`, or `None` when no such user exists.
    async fn find_secret(&self, user_id: UserId) -> Result<Option<String>, StoreError>;
}
