use serde::Deserialize;

use drawer_auth::UserRecord;
use drawer_inventory::ItemCounter;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub item: String,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub name: String,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn counter_to_json(counter: &ItemCounter) -> serde_json::Value {
    serde_json::json!({
        "item": counter.item,
        "count": counter.count,
    })
}

pub fn counters_to_json(counters: &[ItemCounter]) -> serde_json::Value {
    serde_json::Value::Array(counters.iter().map(counter_to_json).collect())
}

pub fn user_to_json(user: &UserRecord) -> serde_json::Value {
    serde_json::json!({
        "id": user.id.to_string(),
        "email": user.email,
        "name": user.name,
        "created_at": user.created_at.to_rfc3339(),
    })
}

/// Creation is the only moment the secret is ever returned.
pub fn created_user_to_json(user: &UserRecord, secret: &str) -> serde_json::Value {
    serde_json::json!({
        "id": user.id.to_string(),
        "email": user.email,
        "name": user.name,
        "secret": secret,
        "created_at": user.created_at.to_rfc3339(),
    })
}
