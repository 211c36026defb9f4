//! Credential store and session issuer: password hashing, bearer tokens,
//! and the extractor that authenticates requests.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    models::user::User,
    state::AppState,
};

/// Long-lived sessions by design; there is no refresh mechanism.
const TOKEN_TTL_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

pub fn hash_password(raw: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AppError::Other(anyhow::anyhow!("password hashing failed: {err}")))
}

pub fn verify_password(raw: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|parsed| {
            Argon2::default()
                .verify_password(raw.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

pub fn issue_token(secret: &str, user_id: &str) -> Result<String, AppError> {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (Utc::now() + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| AppError::Other(err.into()))
}

pub fn resolve_token(secret: &str, token: &str) -> Result<String, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims.sub)
    .map_err(|err| match err.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("Token has expired".into())
        }
        _ => AppError::Unauthorized("Invalid token".into()),
    })
}

pub async fn register_user(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    if User::find_by_email(&state.db, email).await?.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    let user = User::new(name, email, hash_password(password)?);
    user.insert(&state.db).await?;
    Ok(user)
}

pub async fn authenticate_user(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    // Unknown email and wrong password share one error path so the caller
    // cannot tell which failed.
    let invalid = || AppError::Unauthorized("Invalid email or password".into());

    let user = User::find_by_email(&state.db, email)
        .await?
        .ok_or_else(invalid)?;
    if !verify_password(password, &user.password_hash) {
        return Err(invalid());
    }
    Ok(user)
}

/// Authenticated caller, resolved from the `Authorization: Bearer` header.
///
/// Tokens are not revocable, so the user row is re-checked on every
/// request: a valid token for a deleted account is rejected.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".into()))?;

        let user_id = resolve_token(&state.config.jwt_secret, token)?;
        let user = User::find_by_id(&state.db, &user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;

        Ok(Self(user))
    }
}
