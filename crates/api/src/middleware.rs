use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, middleware::Next, response::Response};

use drawer_auth::Authenticator;
use drawer_core::DomainError;

use crate::app::errors;

pub const USER_ID_HEADER: &str = "drawer-user-id";
pub const SECRET_HEADER: &str = "drawer-secret";

#[derive(Clone)]
pub struct AuthState {
    pub authenticator: Arc<Authenticator>,
}

/// Request gate: no counter or user-admin route is reachable without a
/// verified principal.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some((user_id, secret)) = extract_credentials(req.headers()) else {
        return errors::domain_error_response(&DomainError::Unauthorized);
    };

    let principal = match state.authenticator.authenticate(&user_id, &secret).await {
        Ok(principal) => principal,
        Err(err) => return errors::domain_error_response(&err),
    };

    req.extensions_mut().insert(principal);
    next.run(req).await
}

fn extract_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let user_id = headers.get(USER_ID_HEADER)?.to_str().ok()?.to_string();
    let secret = headers.get(SECRET_HEADER)?.to_str().ok()?.to_string();
    Some((user_id, secret))
}
