//! Overlay entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamlay_core::error::CoreError;
use streamlay_core::overlay::OverlayAttachment;
use streamlay_core::types::{DbId, Timestamp};

/// Full overlay row from the `overlays` table.
///
/// The attachment is persisted as two nullable columns guarded by a CHECK
/// constraint; use [`Overlay::attachment`] to get the tagged form.
#[derive(Debug, Clone, FromRow)]
pub struct Overlay {
    pub id: DbId,
    pub kind: String,
    pub content: Option<String>,
    pub image: Option<String>,
    pub x: i32,
    pub y: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub z_index: i32,
    pub visible: bool,
    pub stream_id: Option<DbId>,
    pub owner_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Overlay {
    /// The overlay's attachment as the tagged union.
    pub fn attachment(&self) -> Result<OverlayAttachment, CoreError> {
        OverlayAttachment::from_columns(self.stream_id, self.owner_id)
    }
}

/// Overlay representation for API responses (opaque ids).
#[derive(Debug, Clone, Serialize)]
pub struct OverlayResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: Option<String>,
    pub image: Option<String>,
    pub x: i32,
    pub y: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub z_index: i32,
    pub visible: bool,
    pub stream_id: Option<String>,
    pub owner_id: Option<String>,
}

impl From<Overlay> for OverlayResponse {
    fn from(overlay: Overlay) -> Self {
        Self {
            id: overlay.id.to_string(),
            kind: overlay.kind,
            content: overlay.content,
            image: overlay.image,
            x: overlay.x,
            y: overlay.y,
            width: overlay.width,
            height: overlay.height,
            z_index: overlay.z_index,
            visible: overlay.visible,
            stream_id: overlay.stream_id.map(|id| id.to_string()),
            owner_id: overlay.owner_id.map(|id| id.to_string()),
        }
    }
}

/// Request body for overlay create and update.
///
/// `stream_id` is only meaningful at creation: an overlay's attachment is
/// fixed for its lifetime, so updates ignore it.
#[derive(Debug, Deserialize)]
pub struct OverlayInput {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Opaque stream handle, present only when attaching to a stream.
    pub stream_id: Option<String>,
}

fn default_visible() -> bool {
    true
}

/// DTO for inserting a new overlay with its (already decided) attachment.
#[derive(Debug)]
pub struct CreateOverlay {
    pub kind: String,
    pub content: Option<String>,
    pub image: Option<String>,
    pub x: i32,
    pub y: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub z_index: i32,
    pub visible: bool,
    pub attachment: OverlayAttachment,
}

/// DTO for the full-replace update of an overlay's presentation fields.
///
/// Deliberately has no attachment: classification is immutable.
#[derive(Debug)]
pub struct UpdateOverlay {
    pub kind: String,
    pub content: Option<String>,
    pub image: Option<String>,
    pub x: i32,
    pub y: i32,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub z_index: i32,
    pub visible: bool,
}
