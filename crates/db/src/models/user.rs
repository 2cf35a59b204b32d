//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamlay_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash, opaque id).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// DTO for inserting a new user (password already hashed by the caller).
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// DTO for the full-replace self-update (`PUT /users/me`).
#[derive(Debug)]
pub struct UpdateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Request body for `POST /users/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Accepted for wire compatibility; only `"user"` is honored.
    pub role: Option<String>,
}

/// Request body for `POST /users/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `PUT /users/me` (full replace).
#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}
