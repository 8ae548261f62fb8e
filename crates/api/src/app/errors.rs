use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use drawer_core::DomainError;

/// Map a domain error to its wire representation.
///
/// Store detail is logged here and never echoed to the caller.
pub fn domain_error_response(err: &DomainError) -> axum::response::Response {
    match err {
        DomainError::Unauthorized => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "Unauthorized")
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "Item not found"),
        DomainError::Conflict(msg) => {
            json_error(StatusCode::BAD_REQUEST, "conflict", msg.clone())
        }
        DomainError::InsufficientStock {
            requested,
            available,
        } => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "insufficient_stock",
                "message": err.to_string(),
                "requested": requested,
                "available": available,
            })),
        )
            .into_response(),
        DomainError::InvalidInput(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_input", msg.clone())
        }
        DomainError::StoreUnavailable(detail) => {
            tracing::error!(error = %detail, "store failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal Server Error",
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
