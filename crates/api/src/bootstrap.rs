//! Startup seeding.

use streamlay_core::roles::ROLE_ADMIN;
use streamlay_db::models::user::CreateUser;
use streamlay_db::repositories::UserRepo;
use streamlay_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Seed a default admin account when the users table is empty.
///
/// First boot of a fresh deployment would otherwise have no way to obtain
/// an admin (no endpoint grants the role). The credentials are well-known
/// and must be changed immediately.
pub async fn ensure_default_admin(pool: &DbPool) -> AppResult<()> {
    if UserRepo::count(pool).await? > 0 {
        return Ok(());
    }

    let password_hash = hash_password("admin")
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let admin = UserRepo::create(
        pool,
        &CreateUser {
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::warn!(
        user_id = admin.id,
        "created default admin admin@example.com / admin -- change this password immediately"
    );
    Ok(())
}
