// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration, login and logout routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::{
    create_jwt, decode_jwt, removal_cookie, session_cookie, session_token,
};
use crate::models::User;
use crate::routes::api::UserResponse;
use crate::routes::json_body;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 32, message = "must be 1-32 characters"))]
    pub username: String,
    #[validate(length(min = 6, max = 128, message = "must be 6-128 characters"))]
    pub password: String,
}

impl RegisterRequest {
    /// Usernames are stored trimmed, so length limits apply to the trimmed form.
    fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 32))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

impl LoginRequest {
    fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self
    }
}

/// Returned by register and login. The token is also set as an HttpOnly cookie.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Create an account and sign in.
async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let request = json_body(payload)?.normalized();
    request.validate()?;

    let now = Utc::now();
    let user = state
        .game
        .register(&request.username, &request.password, now)
        .await?;

    let (jar, response) = start_session(&state, jar, &user)?;
    Ok((StatusCode::CREATED, jar, Json(response)))
}

/// Sign in, reopening any daily missions left over from an earlier day.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let request = json_body(payload)?.normalized();
    request
        .validate()
        .map_err(|_| AppError::InvalidCredentials)?;

    let outcome = state
        .game
        .login(&request.username, &request.password, Utc::now())
        .await?;

    let (jar, response) = start_session(&state, jar, &outcome.user)?;
    Ok((jar, Json(response)))
}

/// Revoke the caller's session (if any) and clear the cookie.
///
/// Always succeeds, so logging out twice is harmless.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
) -> (StatusCode, CookieJar) {
    if let Some(claims) = session_token(&jar, &headers)
        .and_then(|token| decode_jwt(&token, &state.config.jwt_signing_key))
    {
        if state.sessions.revoke(claims.sid) {
            tracing::info!(user_id = %claims.sub, "User logged out");
        }
    }

    let jar = jar.add(removal_cookie(state.config.secure_cookies()));
    (StatusCode::NO_CONTENT, jar)
}

fn start_session(state: &AppState, jar: CookieJar, user: &User) -> Result<(CookieJar, AuthResponse)> {
    let now = Utc::now();
    let ttl_hours = state.config.session_ttl_hours;
    let (session_id, expires_at) = state.sessions.create(user.id, now, Duration::hours(ttl_hours));

    let token = create_jwt(
        user.id,
        session_id,
        &state.config.jwt_signing_key,
        now,
        expires_at,
    )
    .map_err(|e| {
        state.sessions.revoke(session_id);
        AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e))
    })?;

    let jar = jar.add(session_cookie(
        token.clone(),
        ttl_hours,
        state.config.secure_cookies(),
    ));

    Ok((
        jar,
        AuthResponse {
            user: UserResponse::from(user),
            token,
        },
    ))
}
