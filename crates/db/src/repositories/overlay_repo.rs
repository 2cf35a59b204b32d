//! Repository for the `overlays` table.

use sqlx::PgPool;
use streamlay_core::types::DbId;

use crate::models::overlay::{CreateOverlay, Overlay, UpdateOverlay};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, kind, content, image, x, y, width, height, z_index, visible, \
                       stream_id, owner_id, created_at, updated_at";

/// Provides CRUD operations for overlays.
pub struct OverlayRepo;

impl OverlayRepo {
    /// Insert a new overlay, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateOverlay) -> Result<Overlay, sqlx::Error> {
        let query = format!(
            "INSERT INTO overlays
                (kind, content, image, x, y, width, height, z_index, visible, stream_id, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Overlay>(&query)
            .bind(&input.kind)
            .bind(&input.content)
            .bind(&input.image)
            .bind(input.x)
            .bind(input.y)
            .bind(input.width)
            .bind(input.height)
            .bind(input.z_index)
            .bind(input.visible)
            .bind(input.attachment.stream_id())
            .bind(input.attachment.owner_id())
            .fetch_one(pool)
            .await
    }

    /// Find an overlay by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Overlay>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM overlays WHERE id = $1");
        sqlx::query_as::<_, Overlay>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the overlays visible to `user_id`: every stream-attached overlay
    /// (regardless of requester) plus the user's own user-owned overlays.
    ///
    /// The broad read on stream overlays is deliberate policy, not a missing
    /// filter.
    pub async fn list_visible_to(pool: &PgPool, user_id: DbId) -> Result<Vec<Overlay>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM overlays
             WHERE stream_id IS NOT NULL OR owner_id = $1
             ORDER BY id"
        );
        sqlx::query_as::<_, Overlay>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Full-replace update of presentation fields. The attachment columns are
    /// never touched: classification is immutable.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOverlay,
    ) -> Result<Option<Overlay>, sqlx::Error> {
        let query = format!(
            "UPDATE overlays SET
                kind = $2,
                content = $3,
                image = $4,
                x = $5,
                y = $6,
                width = $7,
                height = $8,
                z_index = $9,
                visible = $10,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Overlay>(&query)
            .bind(id)
            .bind(&input.kind)
            .bind(&input.content)
            .bind(&input.image)
            .bind(input.x)
            .bind(input.y)
            .bind(input.width)
            .bind(input.height)
            .bind(input.z_index)
            .bind(input.visible)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an overlay. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM overlays WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every overlay attached to `stream_id`, returning the count.
    ///
    /// Called after a stream deletion; the two operations are not wrapped in
    /// a transaction, so a crash in between leaves orphaned overlays (an
    /// accepted failure mode).
    pub async fn delete_by_stream(pool: &PgPool, stream_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM overlays WHERE stream_id = $1")
            .bind(stream_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
