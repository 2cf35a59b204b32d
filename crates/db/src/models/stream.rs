//! Stream entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamlay_core::types::{DbId, Timestamp};

/// Full stream row from the `streams` table.
#[derive(Debug, Clone, FromRow)]
pub struct Stream {
    pub id: DbId,
    pub name: String,
    pub rtsp_url: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Stream representation for API responses (opaque id).
#[derive(Debug, Clone, Serialize)]
pub struct StreamResponse {
    pub id: String,
    pub name: String,
    pub rtsp_url: Option<String>,
    pub description: Option<String>,
}

impl From<Stream> for StreamResponse {
    fn from(stream: Stream) -> Self {
        Self {
            id: stream.id.to_string(),
            name: stream.name,
            rtsp_url: stream.rtsp_url,
            description: stream.description,
        }
    }
}

/// Request body for stream create and full-replace update.
#[derive(Debug, Deserialize)]
pub struct StreamInput {
    pub name: String,
    pub rtsp_url: Option<String>,
    pub description: Option<String>,
}
