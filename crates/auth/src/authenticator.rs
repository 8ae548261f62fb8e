use core::str::FromStr;
use std::sync::Arc;

use drawer_core::{DomainError, DomainResult, UserId};

use crate::credentials::CredentialStore;
use crate::principal::Principal;

/// Validates inbound (user id, secret) pairs against the credential store.
///
/// Runs before every counter operation; a request that fails here never
/// reaches the engine. Read-only, no side effects.
pub struct Authenticator {
    credentials: Arc<dyn CredentialStore>,
}

impl Authenticator {
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self { credentials }
    }

    /// Verify a claimed identity.
    ///
    /// An unparseable id, an unknown id, and a wrong secret all yield the
    /// same `Unauthorized`. A store failure stays `StoreUnavailable` and is
    /// never downgraded to an authentication failure.
    pub async fn authenticate(&self, user_id: &str, secret: &str) -> DomainResult<Principal> {
        let Ok(user_id) = UserId::from_str(user_id) else {
            return Err(DomainError::Unauthorized);
        };

        let stored = self.credentials.find_secret(user_id).await?;

        match stored {
            Some(stored) if stored.as_bytes() == secret.as_bytes() => {
                Ok(Principal::new(user_id))
            }
            _ => Err(DomainError::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use drawer_core::StoreError;

    use super::*;

    #[derive(Default)]
    struct FakeCredentials {
        secrets: Mutex<HashMap<UserId, String>>,
        failing: bool,
    }

    impl FakeCredentials {
        fn with_user(user_id: UserId, secret: &str) -> Self {
            let store = Self::default();
            store
                .secrets
                .lock()
                .unwrap()
                .insert(user_id, secret.to_string());
            store
        }

        fn failing() -> Self {
            Self {
                failing: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl CredentialStore for FakeCredentials {
        async fn find_secret(&self, user_id: UserId) -> Result<Option<String>, StoreError> {
            if self.failing {
                return Err(StoreError::Unavailable("connection refused".to_string()));
            }
            Ok(self.secrets.lock().unwrap().get(&user_id).cloned())
        }
    }

    #[tokio::test]
    async fn valid_credentials_yield_principal() {
        let user_id = UserId::new();
        let auth = Authenticator::new(Arc::new(FakeCredentials::with_user(user_id, "s3cret")));

        let principal = auth
            .authenticate(&user_id.to_string(), "s3cret")
            .await
            .unwrap();
        assert_eq!(principal.user_id(), user_id);
    }

    #[tokio::test]
    async fn wrong_secret_and_unknown_id_are_indistinguishable() {
        let user_id = UserId::new();
        let auth = Authenticator::new(Arc::new(FakeCredentials::with_user(user_id, "s3cret")));

        let wrong_secret = auth
            .authenticate(&user_id.to_string(), "wrong")
            .await
            .unwrap_err();
        let unknown_id = auth
            .authenticate(&UserId::new().to_string(), "s3cret")
            .await
            .unwrap_err();

        assert_eq!(wrong_secret, DomainError::Unauthorized);
        assert_eq!(wrong_secret, unknown_id);
    }

    #[tokio::test]
    async fn unparseable_id_is_unauthorized() {
        let auth = Authenticator::new(Arc::new(FakeCredentials::default()));

        let err = auth.authenticate("not-a-uuid", "whatever").await.unwrap_err();
        assert_eq!(err, DomainError::Unauthorized);
    }

    #[tokio::test]
    async fn secret_comparison_is_exact() {
        let user_id = UserId::new();
        let auth = Authenticator::new(Arc::new(FakeCredentials::with_user(user_id, "s3cret")));

        // Near-misses must not pass.
        for candidate in ["s3cret ", " s3cret", "S3cret", "s3cre", ""] {
            let err = auth
                .authenticate(&user_id.to_string(), candidate)
                .await
                .unwrap_err();
            assert_eq!(err, DomainError::Unauthorized);
        }
    }

    #[tokio::test]
    async fn store_failure_is_not_unauthorized() {
        let auth = Authenticator::new(Arc::new(FakeCredentials::failing()));

        let err = auth
            .authenticate(&UserId::new().to_string(), "s3cret")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::StoreUnavailable(_)));
    }
}
