use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};

use drawer_auth::Principal;
use drawer_inventory::ItemName;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/all", get(list_all))
        .route("/all-items", delete(delete_all))
        .route("/add", post(create_item))
        .route("/item/:item", get(get_item).delete(delete_item))
        .route("/item/:item/add/:count", put(add_count))
        .route("/item/:item/subtract/:count", put(subtract_count))
}

pub async fn list_all(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    match services.engine.list_all(principal.user_id()).await {
        Ok(counters) => (StatusCode::OK, Json(dto::counters_to_json(&counters))).into_response(),
        Err(err) => errors::domain_error_response(&err),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(item): Path<String>,
) -> axum::response::Response {
    let item = match ItemName::new(item) {
        Ok(item) => item,
        Err(err) => return errors::domain_error_response(&err),
    };

    match services.engine.get(principal.user_id(), &item).await {
        Ok(counter) => (StatusCode::OK, Json(dto::counter_to_json(&counter))).into_response(),
        Err(err) => errors::domain_error_response(&err),
    }
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateItemRequest>,
) -> axum::response::Response {
    let item = match ItemName::new(body.item) {
        Ok(item) => item,
        Err(err) => return errors::domain_error_response(&err),
    };

    match services
        .engine
        .create(principal.user_id(), &item, body.count)
        .await
    {
        Ok(counter) => (StatusCode::CREATED, Json(dto::counter_to_json(&counter))).into_response(),
        Err(err) => errors::domain_error_response(&err),
    }
}

pub async fn add_count(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path((item, count)): Path<(String, String)>,
) -> axum::response::Response {
    let (item, delta) = match parse_item_and_count(item, &count) {
        Ok(parsed) => parsed,
        Err(resp) => return resp,
    };

    match services.engine.add(principal.user_id(), &item, delta).await {
        Ok(counter) => (StatusCode::OK, Json(dto::counter_to_json(&counter))).into_response(),
        Err(err) => errors::domain_error_response(&err),
    }
}

pub async fn subtract_count(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path((item, count)): Path<(String, String)>,
) -> axum::response::Response {
    let (item, delta) = match parse_item_and_count(item, &count) {
        Ok(parsed) => parsed,
        Err(resp) => return resp,
    };

    match services
        .engine
        .subtract(principal.user_id(), &item, delta)
        .await
    {
        Ok(counter) => (StatusCode::OK, Json(dto::counter_to_json(&counter))).into_response(),
        Err(err) => errors::domain_error_response(&err),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(item): Path<String>,
) -> axum::response::Response {
    let item = match ItemName::new(item) {
        Ok(item) => item,
        Err(err) => return errors::domain_error_response(&err),
    };

    match services.engine.delete(principal.user_id(), &item).await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "success": true }))).into_response(),
        Err(err) => errors::domain_error_response(&err),
    }
}

pub async fn delete_all(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    match services.engine.delete_all(principal.user_id()).await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "success": true }))).into_response(),
        Err(err) => errors::domain_error_response(&err),
    }
}

/// Path `:count` segments are parsed by hand so a malformed value maps to
/// the invalid-input taxonomy instead of a framework rejection.
fn parse_item_and_count(
    item: String,
    count: &str,
) -> Result<(ItemName, i64), axum::response::Response> {
    let item = ItemName::new(item).map_err(|err| errors::domain_error_response(&err))?;
    let count: i64 = count.parse().map_err(|_| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_input",
            "count must be an integer",
        )
    })?;
    Ok((item, count))
}
