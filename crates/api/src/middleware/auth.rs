//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use streamlay_core::error::CoreError;
use streamlay_core::policy::Actor;
use streamlay_db::models::user::User;
use streamlay_db::repositories::UserRepo;

use crate::auth::jwt::{validate_token, TokenError};
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated user for the current request.
///
/// Validates the `Authorization: Bearer <token>` header and then re-reads
/// the user row from the store, so the live stored role (not the role
/// frozen into the token at issuance) governs authorization. A user deleted
/// after token issuance is rejected as unauthenticated.
///
/// ```ignore
/// async fn my_handler(CurrentUser(user): CurrentUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    /// The policy-layer view of this user.
    pub fn actor(&self) -> Actor {
        Actor::new(self.0.id, self.0.role.clone())
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            let msg = match e {
                TokenError::Expired => "Token expired",
                TokenError::Invalid => "Invalid token",
            };
            AppError::Core(CoreError::Unauthorized(msg.into()))
        })?;

        // Fresh lookup: the stored role governs, and a stale token for a
        // deleted user must not authenticate.
        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User not found".into())))?;

        Ok(CurrentUser(user))
    }
}
