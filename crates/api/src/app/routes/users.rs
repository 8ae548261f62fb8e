use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post, put},
};

use drawer_auth::{NewUser, UserDirectory, UserUpdate};
use drawer_core::{DomainError, StoreError, UserId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/create", post(create_user))
        .route("/update/:id", put(update_user))
        .route("/:id", delete(delete_user))
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateUserRequest>,
) -> axum::response::Response {
    let new_user = match NewUser::new(body.email, body.name) {
        Ok(user) => user,
        Err(err) => return errors::domain_error_response(&err),
    };

    let secret = generate_secret();
    match services.users.create(new_user, secret.clone()).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(dto::created_user_to_json(&user, &secret)),
        )
            .into_response(),
        Err(StoreError::Duplicate) => errors::json_error(
            StatusCode::BAD_REQUEST,
            "conflict",
            "Email already exists",
        ),
        Err(err) => errors::domain_error_response(&DomainError::from(err)),
    }
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateUserRequest>,
) -> axum::response::Response {
    let id: UserId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_input", "invalid user id");
        }
    };

    let update = match UserUpdate::new(body.email, body.name) {
        Ok(update) => update,
        Err(err) => return errors::domain_error_response(&err),
    };

    match services.users.update(id, update).await {
        Ok(Some(user)) => (StatusCode::OK, Json(dto::user_to_json(&user))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "User not found"),
        Err(StoreError::Duplicate) => errors::json_error(
            StatusCode::BAD_REQUEST,
            "conflict",
            "Email already exists",
        ),
        Err(err) => errors::domain_error_response(&DomainError::from(err)),
    }
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: UserId = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_input", "invalid user id");
        }
    };

    match services.users.remove(id).await {
        Ok(true) => (StatusCode::OK, Json(serde_json::json!({ "success": true }))).into_response(),
        Ok(false) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "User not found"),
        Err(err) => errors::domain_error_response(&DomainError::from(err)),
    }
}

/// Opaque 32-hex-char shared secret, handed to the caller once at creation.
fn generate_secret() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
