use axum::{Router, routing::get};

pub mod drawer;
pub mod system;
pub mod users;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/drawer", drawer::router())
        .nest("/users", users::router())
}
