//! Route definitions for the `/streams` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::streams;
use crate::state::AppState;

/// Routes mounted at `/streams`.
///
/// ```text
/// GET    /      -> list (authenticated)
/// POST   /      -> create (admin)
/// GET    /{id}  -> get_by_id (authenticated)
/// PUT    /{id}  -> update (admin)
/// DELETE /{id}  -> delete (admin, cascades to overlays)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(streams::list).post(streams::create))
        .route(
            "/{id}",
            get(streams::get_by_id)
                .put(streams::update)
                .delete(streams::delete),
        )
}
