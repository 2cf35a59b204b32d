//! Handlers for the `/users` resource (registration, login, self-service,
//! admin management).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use streamlay_core::error::CoreError;
use streamlay_core::policy::{Action, Resource};
use streamlay_core::roles::ROLE_USER;
use streamlay_core::types::DbId;
use streamlay_db::models::user::{
    CreateUser, LoginRequest, RegisterRequest, UpdateMeRequest, UpdateUser, UserResponse,
};
use streamlay_db::repositories::UserRepo;

use crate::auth::jwt::issue_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::authorize;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

/// Response body for `POST /users/login`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// POST /users/register (public)
///
/// Returns 201 with the created user, or 400 if the email is taken. The
/// requested role is accepted on the wire but never elevates: every
/// registration is stored with the plain user role.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already exists".into(),
        )));
    }

    if let Some(requested) = input.role.as_deref() {
        if requested != ROLE_USER {
            tracing::warn!(requested, email = %input.email, "ignoring requested role at registration");
        }
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            email: input.email,
            password_hash,
            role: ROLE_USER.to_string(),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /users/login (public)
///
/// Authenticate with email + password. Returns 201 (a historical quirk of
/// the public contract, kept as-is) with a bearer access token; a missing
/// user and a bad password are indistinguishable 401s.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let access_token = issue_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            access_token,
            token_type: "bearer",
        }),
    ))
}

/// GET /users (admin)
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    authorize(&current.actor(), Resource::UserDirectory, Action::List)?;

    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/me (authenticated)
pub async fn me(current: CurrentUser) -> AppResult<Json<UserResponse>> {
    Ok(Json(current.0.into()))
}

/// PUT /users/me (authenticated)
///
/// Full replace of name/email/password for the caller's own record.
pub async fn update_me(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(input): Json<UpdateMeRequest>,
) -> AppResult<Json<UserResponse>> {
    let actor = current.actor();
    authorize(
        &actor,
        Resource::UserRecord { target: actor.id },
        Action::Update,
    )?;

    // The new email must not belong to someone else.
    if let Some(existing) = UserRepo::find_by_email(&state.pool, &input.email).await? {
        if existing.id != actor.id {
            return Err(AppError::Core(CoreError::Conflict(
                "Email already exists".into(),
            )));
        }
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::update(
        &state.pool,
        actor.id,
        &UpdateUser {
            name: input.name,
            email: input.email,
            password_hash,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "User",
        id: actor.id,
    }))?;

    Ok(Json(updated.into()))
}

/// DELETE /users/{id} (admin)
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    authorize(
        &current.actor(),
        Resource::UserRecord { target: id },
        Action::Delete,
    )?;

    let deleted = UserRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}
