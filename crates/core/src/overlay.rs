//! Overlay classification and content validation.
//!
//! An overlay is permanently either stream-attached or user-owned; the
//! [`OverlayAttachment`] enum makes the "exactly one of stream_id/owner_id"
//! invariant unrepresentable rather than merely checked.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::DbId;

/// The three supported overlay kinds (the wire field is called `type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Image,
    Text,
    Banner,
}

impl OverlayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayKind::Image => "image",
            OverlayKind::Text => "text",
            OverlayKind::Banner => "banner",
        }
    }
}

impl FromStr for OverlayKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(OverlayKind::Image),
            "text" => Ok(OverlayKind::Text),
            "banner" => Ok(OverlayKind::Banner),
            other => Err(CoreError::Validation(format!(
                "Overlay type must be one of 'image', 'text', 'banner' (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an overlay is attached to, fixed at creation for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAttachment {
    /// Attached to a stream; admin-only writes, unrestricted reads.
    Stream(DbId),
    /// Owned by a single user; owner-or-admin writes.
    Owner(DbId),
}

impl OverlayAttachment {
    /// The `stream_id` column value for this attachment.
    pub fn stream_id(&self) -> Option<DbId> {
        match self {
            OverlayAttachment::Stream(id) => Some(*id),
            OverlayAttachment::Owner(_) => None,
        }
    }

    /// The `owner_id` column value for this attachment.
    pub fn owner_id(&self) -> Option<DbId> {
        match self {
            OverlayAttachment::Stream(_) => None,
            OverlayAttachment::Owner(id) => Some(*id),
        }
    }

    /// Reconstruct an attachment from the two nullable storage columns.
    ///
    /// The overlays table carries a CHECK constraint guaranteeing exactly one
    /// is set; a row violating it can only come from direct store
    /// manipulation and is reported as an internal error.
    pub fn from_columns(
        stream_id: Option<DbId>,
        owner_id: Option<DbId>,
    ) -> Result<Self, CoreError> {
        match (stream_id, owner_id) {
            (Some(stream), None) => Ok(OverlayAttachment::Stream(stream)),
            (None, Some(owner)) => Ok(OverlayAttachment::Owner(owner)),
            (Some(_), Some(_)) => Err(CoreError::Internal(
                "Overlay has both stream_id and owner_id set".into(),
            )),
            (None, None) => Err(CoreError::Internal(
                "Overlay has neither stream_id nor owner_id set".into(),
            )),
        }
    }
}

/// Validate overlay content against the per-kind rules.
///
/// - `image`: content must be present and start with `http://` or `https://`.
/// - `text`: content must be present and non-empty after trimming.
/// - `banner`: no content restriction.
pub fn validate_content(kind: OverlayKind, content: Option<&str>) -> Result<(), CoreError> {
    match kind {
        OverlayKind::Image => {
            let url = content.unwrap_or("");
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(())
            } else {
                Err(CoreError::Validation(
                    "For image overlays, 'content' must be a valid image URL".into(),
                ))
            }
        }
        OverlayKind::Text => {
            if content.is_some_and(|c| !c.trim().is_empty()) {
                Ok(())
            } else {
                Err(CoreError::Validation(
                    "For text overlays, 'content' cannot be empty".into(),
                ))
            }
        }
        OverlayKind::Banner => Ok(()),
    }
}
