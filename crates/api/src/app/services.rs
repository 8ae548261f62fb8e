use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use drawer_auth::{Authenticator, UserDirectory};
use drawer_infra::{InMemoryCounterStore, InMemoryUserStore, PostgresCounterStore, PostgresUserStore};
use drawer_inventory::CounterEngine;

/// Service wiring shared by every request handler.
pub struct AppServices {
    pub authenticator: Arc<Authenticator>,
    pub engine: CounterEngine,
    pub users: Arc<dyn UserDirectory>,
}

impl AppServices {
    /// Production wiring: postgres-backed stores sharing one pool.
    pub fn postgres(pool: PgPool, timeout: Duration) -> Self {
        let counters = Arc::new(PostgresCounterStore::new(pool.clone(), timeout));
        let users = Arc::new(PostgresUserStore::new(pool, timeout));
        Self {
            authenticator: Arc::new(Authenticator::new(users.clone())),
            engine: CounterEngine::new(counters),
            users,
        }
    }

    /// In-memory wiring for tests and local experiments. Also returns the
    /// user store so callers can seed credentials directly.
    pub fn in_memory() -> (Self, Arc<InMemoryUserStore>) {
        let counters = Arc::new(InMemoryCounterStore::new());
        let users = Arc::new(InMemoryUserStore::new());
        let services = Self {
            authenticator: Arc::new(Authenticator::new(users.clone())),
            engine: CounterEngine::new(counters),
            users: users.clone(),
        };
        (services, users)
    }
}
