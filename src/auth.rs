use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    config::AppConfig,
    error::ApiError,
    models::Role,
    repository::RepositoryState,
};

/// How long an issued token stays valid.
const TOKEN_TTL_SECS: i64 = 60 * 60 * 24;

/// Claims
///
/// Payload carried inside every JWT issued by the login endpoints. The role
/// tag decides which table the subject id resolves against, since each role
/// lives in its own table.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the user's row id within its role table.
    pub sub: i64,
    /// Role tag baked in at login time.
    pub role: Role,
    /// Expiration time, seconds since the epoch.
    pub exp: usize,
    /// Issued at, seconds since the epoch.
    pub iat: usize,
}

/// AuthUser
///
/// The resolved identity of an authenticated request. Handlers take this as
/// an extractor argument and use the role for access checks.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub role: Role,
    pub username: String,
}

/// AuthUser Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AuthUser usable as a
/// function argument in any protected handler. The flow:
/// 1. Bearer token extraction from the Authorization header.
/// 2. JWT decode + expiry validation against the configured secret.
/// 3. Existence lookup in the table named by the role claim, so a token
///    issued for a since-deleted user stops working immediately.
///
/// Rejection: 401 Unauthorized on any failure.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            // Expired, malformed and bad-signature tokens all fail the same way.
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        let Claims { sub, role, .. } = token_data.claims;

        let username = match role {
            Role::Admin => repo
                .find_admin(sub)
                .await
                .map_err(|_| StatusCode::UNAUTHORIZED)?
                .map(|a| a.username),
            Role::Lecturer => repo
                .find_lecturer(sub)
                .await
                .map_err(|_| StatusCode::UNAUTHORIZED)?
                .map(|l| l.username),
            Role::Student => repo
                .find_student(sub)
                .await
                .map_err(|_| StatusCode::UNAUTHORIZED)?
                .map(|s| s.username),
        }
        .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(AuthUser {
            id: sub,
            role,
            username,
        })
    }
}

/// Issues a signed token for the given identity.
pub fn issue_token(user_id: i64, role: Role, secret: &str) -> Result<String, ApiError> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role,
        iat: now as usize,
        exp: (now + TOKEN_TTL_SECS) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("failed to issue token: {e}")))
}

/// Hashes a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("failed to hash password: {e}")))
}

/// Verifies a password against a stored Argon2 hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|_| ApiError::Internal("invalid password hash format".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
