//! Handlers for the `/streams` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamlay_core::error::CoreError;
use streamlay_core::policy::{Action, Resource};
use streamlay_core::types::DbId;
use streamlay_db::models::stream::{StreamInput, StreamResponse};
use streamlay_db::repositories::{OverlayRepo, StreamRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::authorize;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

/// POST /streams (admin)
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(input): Json<StreamInput>,
) -> AppResult<(StatusCode, Json<StreamResponse>)> {
    authorize(&current.actor(), Resource::Stream, Action::Create)?;

    let stream = StreamRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(stream.into())))
}

/// GET /streams (authenticated)
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<StreamResponse>>> {
    authorize(&current.actor(), Resource::Stream, Action::List)?;

    let streams = StreamRepo::list(&state.pool).await?;
    Ok(Json(
        streams.into_iter().map(StreamResponse::from).collect(),
    ))
}

/// GET /streams/{id} (authenticated)
pub async fn get_by_id(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<StreamResponse>> {
    authorize(&current.actor(), Resource::Stream, Action::Read)?;

    let stream = StreamRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Stream",
            id,
        }))?;
    Ok(Json(stream.into()))
}

/// PUT /streams/{id} (admin)
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<StreamInput>,
) -> AppResult<Json<StreamResponse>> {
    authorize(&current.actor(), Resource::Stream, Action::Update)?;

    let stream = StreamRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Stream",
            id,
        }))?;
    Ok(Json(stream.into()))
}

/// DELETE /streams/{id} (admin)
///
/// Idempotent: returns 204 whether or not the stream existed. The overlay
/// cascade is a second, independent store operation -- a crash between the
/// two leaves orphaned overlays, which is accepted.
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    authorize(&current.actor(), Resource::Stream, Action::Delete)?;

    StreamRepo::delete(&state.pool, id).await?;
    let removed = OverlayRepo::delete_by_stream(&state.pool, id).await?;
    if removed > 0 {
        tracing::info!(stream_id = id, removed, "cascaded overlay deletion");
    }

    Ok(StatusCode::NO_CONTENT)
}
