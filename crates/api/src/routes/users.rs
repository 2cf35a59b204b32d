//! Route definitions for the `/users` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /register  -> register (public)
/// POST   /login     -> login (public)
/// GET    /          -> list (admin)
/// GET    /me        -> me (authenticated)
/// PUT    /me        -> update_me (authenticated)
/// DELETE /{id}      -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/", get(users::list))
        .route("/me", get(users::me).put(users::update_me))
        .route("/{id}", delete(users::delete))
}
