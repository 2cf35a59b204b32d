//! Repository for the `streams` table.

use sqlx::PgPool;
use streamlay_core::types::DbId;

use crate::models::stream::{Stream, StreamInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, rtsp_url, description, created_at, updated_at";

/// Provides CRUD operations for streams.
pub struct StreamRepo;

impl StreamRepo {
    /// Insert a new stream, returning the created row.
    pub async fn create(pool: &PgPool, input: &StreamInput) -> Result<Stream, sqlx::Error> {
        let query = format!(
            "INSERT INTO streams (name, rtsp_url, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Stream>(&query)
            .bind(&input.name)
            .bind(&input.rtsp_url)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a stream by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Stream>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM streams WHERE id = $1");
        sqlx::query_as::<_, Stream>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all streams ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Stream>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM streams ORDER BY created_at DESC");
        sqlx::query_as::<_, Stream>(&query).fetch_all(pool).await
    }

    /// Full-replace update. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &StreamInput,
    ) -> Result<Option<Stream>, sqlx::Error> {
        let query = format!(
            "UPDATE streams SET
                name = $2,
                rtsp_url = $3,
                description = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Stream>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.rtsp_url)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a stream. Returns `true` if a row was removed.
    ///
    /// Does NOT touch overlays; the cascading overlay delete is a separate,
    /// deliberately non-transactional call (see `OverlayRepo::delete_by_stream`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM streams WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
