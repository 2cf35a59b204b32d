//! Route definitions for the `/overlays` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::overlays;
use crate::state::AppState;

/// Routes mounted at `/overlays`.
///
/// ```text
/// GET    /      -> list (authenticated; union of stream + own overlays)
/// POST   /      -> create (authenticated; stream-attached is admin-only)
/// GET    /{id}  -> get_by_id (per policy)
/// PUT    /{id}  -> update (per policy)
/// DELETE /{id}  -> delete (per policy)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(overlays::list).post(overlays::create))
        .route(
            "/{id}",
            get(overlays::get_by_id)
                .put(overlays::update)
                .delete(overlays::delete),
        )
}
