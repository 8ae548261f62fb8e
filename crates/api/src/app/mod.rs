//! HTTP application wiring (axum router + service wiring).
//!
//! - `services.rs`: store/engine wiring (postgres for production, in-memory
//!   for tests)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (entrypoint for `main` and the black-box
/// tests).
pub fn build_app(services: services::AppServices) -> Router {
    let services = Arc::new(services);
    let auth_state = middleware::AuthState {
        authenticator: services.authenticator.clone(),
    };

    // The gate runs before any handler; the services extension is attached
    // underneath it.
    let protected = routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                auth_state,
                middleware::auth_middleware,
            ))
            .layer(Extension(services)),
    );

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
