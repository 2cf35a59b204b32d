//! Route tree assembly.

pub mod health;
pub mod overlays;
pub mod streams;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree (everything except `/health`).
///
/// ```text
/// /users/...     registration, login, self-service, admin management
/// /streams/...   stream CRUD
/// /overlays/...  overlay CRUD
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/streams", streams::router())
        .nest("/overlays", overlays::router())
}
