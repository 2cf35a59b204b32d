//! JWT access-token generation and validation.
//!
//! Access tokens are signed JWTs (HS256 unless configured otherwise)
//! containing a [`Claims`] payload. They are the sole source of actor
//! identity for every authorized request; there is no session storage.

use std::str::FromStr;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use streamlay_core::types::DbId;
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// The user's role name at issuance (e.g. `"admin"`, `"user"`).
    ///
    /// Authorization re-reads the live role from the store per request;
    /// this claim only records what was signed.
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Why a token failed validation. Both map to a 401 at the boundary but
/// are logically distinct causes.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret used to sign and verify tokens.
    pub secret: String,
    /// Signing algorithm identifier (default: HS256).
    pub algorithm: Algorithm,
    /// Access token lifetime in seconds (default: 3600).
    pub token_ttl_secs: i64,
}

/// Default access token lifetime in seconds.
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var          | Required | Default |
    /// |------------------|----------|---------|
    /// | `JWT_SECRET`     | **yes**  | --      |
    /// | `JWT_ALGORITHM`  | no       | `HS256` |
    /// | `TOKEN_TTL_SECS` | no       | `3600`  |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or on malformed values.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let algorithm = std::env::var("JWT_ALGORITHM")
            .map(|s| Algorithm::from_str(&s).expect("JWT_ALGORITHM must be a known algorithm"))
            .unwrap_or(Algorithm::HS256);

        let token_ttl_secs: i64 = std::env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_TTL_SECS.to_string())
            .parse()
            .expect("TOKEN_TTL_SECS must be a valid i64");

        Self {
            secret,
            algorithm,
            token_ttl_secs,
        }
    }
}

/// Generate a signed access token for the given user.
///
/// The token carries the user id, the role at issuance, issue time, and an
/// absolute expiry of issue time + configured ttl.
pub fn issue_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: now + config.token_ttl_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(config.algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Signature/format failures and expiry are distinguished: an expired but
/// otherwise well-formed token yields [`TokenError::Expired`], anything
/// else [`TokenError::Invalid`].
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(config.algorithm),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })?;
    Ok(token_data.claims)
}
