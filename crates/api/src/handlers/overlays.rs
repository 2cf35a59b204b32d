//! Handlers for the `/overlays` resource.
//!
//! Overlays are either stream-attached (admin-only writes, open reads) or
//! user-owned (owner-or-admin writes). The classification is decided at
//! creation and never changes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamlay_core::error::CoreError;
use streamlay_core::overlay::{validate_content, OverlayAttachment, OverlayKind};
use streamlay_core::policy::{Action, Resource};
use streamlay_core::types::DbId;
use streamlay_db::models::overlay::{CreateOverlay, OverlayInput, OverlayResponse, UpdateOverlay};
use streamlay_db::repositories::{OverlayRepo, StreamRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::authorize;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

/// Parse and validate the mutable fields of an overlay payload.
fn validated_kind(input: &OverlayInput) -> Result<OverlayKind, AppError> {
    let kind: OverlayKind = input.kind.parse().map_err(AppError::Core)?;
    validate_content(kind, input.content.as_deref()).map_err(AppError::Core)?;
    Ok(kind)
}

/// Parse an opaque stream handle from a request body.
fn parse_stream_handle(handle: &str) -> Result<DbId, AppError> {
    handle.parse().map_err(|_| {
        AppError::Core(CoreError::Validation(
            "stream_id is not a valid stream handle".into(),
        ))
    })
}

/// POST /overlays (authenticated)
///
/// With a `stream_id` the overlay is stream-attached: the stream must exist
/// (checked before authorization) and only an admin may create it. Without
/// one the overlay is user-owned by the caller.
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(input): Json<OverlayInput>,
) -> AppResult<(StatusCode, Json<OverlayResponse>)> {
    let kind = validated_kind(&input)?;
    let actor = current.actor();

    let attachment = match input.stream_id.as_deref() {
        Some(handle) => {
            let stream_id = parse_stream_handle(handle)?;
            // Referential check comes before the authorization check.
            StreamRepo::find_by_id(&state.pool, stream_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Stream",
                    id: stream_id,
                }))?;
            OverlayAttachment::Stream(stream_id)
        }
        None => OverlayAttachment::Owner(actor.id),
    };

    authorize(&actor, Resource::Overlay(attachment), Action::Create)?;

    let overlay = OverlayRepo::create(
        &state.pool,
        &CreateOverlay {
            kind: kind.as_str().to_string(),
            content: input.content,
            image: input.image,
            x: input.x,
            y: input.y,
            width: input.width,
            height: input.height,
            z_index: input.z_index,
            visible: input.visible,
            attachment,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(overlay.into())))
}

/// GET /overlays (authenticated)
///
/// Union listing: every stream-attached overlay plus the caller's own
/// user-owned overlays. Stream overlays are deliberately not filtered by
/// requester here, unlike the single-resource get.
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<OverlayResponse>>> {
    let overlays = OverlayRepo::list_visible_to(&state.pool, current.0.id).await?;
    Ok(Json(
        overlays.into_iter().map(OverlayResponse::from).collect(),
    ))
}

/// GET /overlays/{id} (authenticated, per policy)
pub async fn get_by_id(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<OverlayResponse>> {
    let overlay = OverlayRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Overlay",
            id,
        }))?;

    let attachment = overlay.attachment().map_err(AppError::Core)?;
    authorize(&current.actor(), Resource::Overlay(attachment), Action::Read)?;

    Ok(Json(overlay.into()))
}

/// PUT /overlays/{id} (owner or admin, per policy)
///
/// Full replace of the presentation fields; the attachment is immutable
/// and any `stream_id` in the payload is ignored.
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<OverlayInput>,
) -> AppResult<Json<OverlayResponse>> {
    let overlay = OverlayRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Overlay",
            id,
        }))?;

    let attachment = overlay.attachment().map_err(AppError::Core)?;
    authorize(
        &current.actor(),
        Resource::Overlay(attachment),
        Action::Update,
    )?;

    let kind = validated_kind(&input)?;

    let updated = OverlayRepo::update(
        &state.pool,
        id,
        &UpdateOverlay {
            kind: kind.as_str().to_string(),
            content: input.content,
            image: input.image,
            x: input.x,
            y: input.y,
            width: input.width,
            height: input.height,
            z_index: input.z_index,
            visible: input.visible,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Overlay",
        id,
    }))?;

    Ok(Json(updated.into()))
}

/// DELETE /overlays/{id} (owner or admin, per policy)
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let overlay = OverlayRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Overlay",
            id,
        }))?;

    let attachment = overlay.attachment().map_err(AppError::Core)?;
    authorize(
        &current.actor(),
        Resource::Overlay(attachment),
        Action::Delete,
    )?;

    OverlayRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
