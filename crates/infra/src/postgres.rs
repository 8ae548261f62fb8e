//! Postgres-backed stores (sqlx).
//!
//! Every query runs under a bounded timeout and every sqlx failure is
//! collapsed into [`StoreError`] before it leaves this module; raw driver
//! errors never cross the port boundary.
//!
//! The (user_id, item) primary key on `items` is the single source of truth
//! for counter uniqueness, and the decrement is a single conditioned
//! `UPDATE ... WHERE count >= $delta` so two concurrent subtracts can never
//! drive a count negative.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use drawer_auth::{CredentialStore, NewUser, UserDirectory, UserRecord, UserUpdate};
use drawer_core::{StoreError, UserId};
use drawer_inventory::{CounterStore, ItemCounter, ItemName};

/// Embedded schema migrations (`crates/infra/migrations`).
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::Duplicate;
        }
    }
    StoreError::Unavailable(err.to_string())
}

async fn timed<T, F>(limit: Duration, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(res) => res.map_err(classify),
        Err(_) => Err(StoreError::Unavailable("store call timed out".to_string())),
    }
}

fn counter_from_row(row: &PgRow) -> Result<ItemCounter, StoreError> {
    let item: String = row
        .try_get("item")
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    let count: i64 = row
        .try_get("count")
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    Ok(ItemCounter { item, count })
}

/// Postgres counter store.
pub struct PostgresCounterStore {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresCounterStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl CounterStore for PostgresCounterStore {
    async fn list(&self, owner: UserId) -> Result<Vec<ItemCounter>, StoreError> {
        let rows = timed(
            self.timeout,
            sqlx::query(
                r#"
                SELECT item, count
                FROM items
                WHERE user_id = $1
                ORDER BY item
                "#,
            )
            .bind(owner.as_uuid())
            .fetch_all(&self.pool),
        )
        .await?;

        rows.iter().map(counter_from_row).collect()
    }

    async fn fetch(
        &self,
        owner: UserId,
        item: &ItemName,
    ) -> Result<Option<ItemCounter>, StoreError> {
        let row = timed(
            self.timeout,
            sqlx::query(
                r#"
                SELECT item, count
                FROM items
                WHERE user_id = $1 AND item = $2
                "#,
            )
            .bind(owner.as_uuid())
            .bind(item.as_str())
            .fetch_optional(&self.pool),
        )
        .await?;

        row.as_ref().map(counter_from_row).transpose()
    }

    async fn insert(
        &self,
        owner: UserId,
        item: &ItemName,
        count: i64,
    ) -> Result<ItemCounter, StoreError> {
        let row = timed(
            self.timeout,
            sqlx::query(
                r#"
                INSERT INTO items (user_id, item, count)
                VALUES ($1, $2, $3)
                RETURNING item, count
                "#,
            )
            .bind(owner.as_uuid())
            .bind(item.as_str())
            .bind(count)
            .fetch_one(&self.pool),
        )
        .await?;

        counter_from_row(&row)
    }

    async fn add(
        &self,
        owner: UserId,
        item: &ItemName,
        delta: i64,
    ) -> Result<Option<ItemCounter>, StoreError> {
        let row = timed(
            self.timeout,
            sqlx::query(
                r#"
                UPDATE items
                SET count = count + $3, updated_at = now()
                WHERE user_id = $1 AND item = $2
                RETURNING item, count
                "#,
            )
            .bind(owner.as_uuid())
            .bind(item.as_str())
            .bind(delta)
            .fetch_optional(&self.pool),
        )
        .await?;

        row.as_ref().map(counter_from_row).transpose()
    }

    async fn subtract_if_sufficient(
        &self,
        owner: UserId,
        item: &ItemName,
        delta: i64,
    ) -> Result<Option<ItemCounter>, StoreError> {
        let row = timed(
            self.timeout,
            sqlx::query(
                r#"
                UPDATE items
                SET count = count - $3, updated_at = now()
                WHERE user_id = $1 AND item = $2 AND count >= $3
                RETURNING item, count
                "#,
            )
            .bind(owner.as_uuid())
            .bind(item.as_str())
            .bind(delta)
            .fetch_optional(&self.pool),
        )
        .await?;

        row.as_ref().map(counter_from_row).transpose()
    }

    async fn remove(&self, owner: UserId, item: &ItemName) -> Result<bool, StoreError> {
        let result = timed(
            self.timeout,
            sqlx::query(
                r#"
                DELETE FROM items
                WHERE user_id = $1 AND item = $2
                "#,
            )
            .bind(owner.as_uuid())
            .bind(item.as_str())
            .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_all(&self, owner: UserId) -> Result<u64, StoreError> {
        let result = timed(
            self.timeout,
            sqlx::query(
                r#"
                DELETE FROM items
                WHERE user_id = $1
                "#,
            )
            .bind(owner.as_uuid())
            .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }
}

fn user_from_row(row: &PgRow) -> Result<UserRecord, StoreError> {
    let id: uuid::Uuid = row
        .try_get("id")
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
    Ok(UserRecord {
        id: UserId::from_uuid(id),
        email,
        name,
        created_at,
    })
}

/// Postgres user store, backing both the credential lookup and the user
/// admin surface from the single `users` table.
pub struct PostgresUserStore {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl CredentialStore for PostgresUserStore {
    async fn find_secret(&self, user_id: UserId) -> Result<Option<String>, StoreError> {
        let row = timed(
            self.timeout,
            sqlx::query(
                r#"
                SELECT secret
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool),
        )
        .await?;

        row.map(|r| {
            r.try_get("secret")
                .map_err(|e| StoreError::Unavailable(e.to_string()))
        })
        .transpose()
    }
}

#[async_trait]
impl UserDirectory for PostgresUserStore {
    async fn create(&self, user: NewUser, secret: String) -> Result<UserRecord, StoreError> {
        let id = UserId::new();
        let row = timed(
            self.timeout,
            sqlx::query(
                r#"
                INSERT INTO users (id, email, name, secret)
                VALUES ($1, $2, $3, $4)
                RETURNING id, email, name, created_at
                "#,
            )
            .bind(id.as_uuid())
            .bind(&user.email)
            .bind(&user.name)
            .bind(&secret)
            .fetch_one(&self.pool),
        )
        .await?;

        user_from_row(&row)
    }

    async fn update(
        &self,
        id: UserId,
        update: UserUpdate,
    ) -> Result<Option<UserRecord>, StoreError> {
        let row = timed(
            self.timeout,
            sqlx::query(
                r#"
                UPDATE users
                SET email = $2, name = $3
                WHERE id = $1
                RETURNING id, email, name, created_at
                "#,
            )
            .bind(id.as_uuid())
            .bind(&update.email)
            .bind(&update.name)
            .fetch_optional(&self.pool),
        )
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn remove(&self, id: UserId) -> Result<bool, StoreError> {
        let result = timed(
            self.timeout,
            sqlx::query(
                r#"
                DELETE FROM users
                WHERE id = $1
                "#,
            )
            .bind(id.as_uuid())
            .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
