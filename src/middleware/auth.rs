// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT session authentication middleware.
//!
//! A request is authenticated when it carries a valid HS256 token (cookie
//! first, then `Authorization: Bearer`) whose session is still registered
//! in the [`SessionStore`](crate::services::SessionStore).

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Name of the HttpOnly session cookie.
pub const SESSION_COOKIE: &str = "liferpg_token";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// Session ID, checked against the session store
    pub sid: Uuid,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Middleware that requires valid JWT authentication.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(&jar, request.headers()).ok_or(AppError::Unauthorized)?;
    let claims = decode_jwt(&token, &state.config.jwt_signing_key).ok_or(AppError::Unauthorized)?;

    if !state.sessions.is_active(claims.sid, claims.sub, Utc::now()) {
        tracing::debug!(user_id = %claims.sub, "Rejected token for inactive session");
        return Err(AppError::Unauthorized);
    }

    request
        .extensions_mut()
        .insert(AuthUser { user_id: claims.sub });

    Ok(next.run(request).await)
}

/// Session token from the cookie, falling back to the bearer header.
pub fn session_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
}

/// Decode and validate a session token. Returns `None` if it is invalid or expired.
pub fn decode_jwt(token: &str, signing_key: &[u8]) -> Option<Claims> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .ok()
}

/// Create a JWT for a user session.
pub fn create_jwt(
    user_id: Uuid,
    session_id: Uuid,
    signing_key: &[u8],
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        sid: session_id,
        iat: usize::try_from(issued_at.timestamp())?,
        exp: usize::try_from(expires_at.timestamp())?,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Session cookie carrying `token`, valid for `ttl_hours`.
pub fn session_cookie(token: String, ttl_hours: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::hours(ttl_hours))
        .build()
}

/// Expired cookie that clears the session cookie. Attributes match [`session_cookie`].
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const KEY: &[u8] = b"test_jwt_key_32_bytes_minimum!!!";

    #[test]
    fn test_jwt_roundtrip() {
        let user_id = Uuid::new_v4();
        let sid = Uuid::new_v4();
        let now = Utc::now();
        let token = create_jwt(user_id, sid, KEY, now, now + Duration::hours(1)).unwrap();

        let claims = decode_jwt(&token, KEY).expect("token should decode");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.sid, sid);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_jwt_wrong_key_rejected() {
        let now = Utc::now();
        let token =
            create_jwt(Uuid::new_v4(), Uuid::new_v4(), KEY, now, now + Duration::hours(1)).unwrap();

        assert!(decode_jwt(&token, b"another_key_that_is_32_bytes_!!!").is_none());
    }

    #[test]
    fn test_jwt_expired_rejected() {
        let issued = Utc::now() - Duration::hours(3);
        let token = create_jwt(
            Uuid::new_v4(),
            Uuid::new_v4(),
            KEY,
            issued,
            issued + Duration::hours(1),
        )
        .unwrap();

        assert!(decode_jwt(&token, KEY).is_none());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc".to_string(), 24, true).to_string();
        assert!(cookie.starts_with("liferpg_token=abc"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=86400"));

        let removal = removal_cookie(false).to_string();
        assert!(removal.contains("Max-Age=0"));
        assert!(!removal.contains("Secure"));
    }
}
