// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Achievement, CharacterStats, LevelProgress, Mission, Rank, StatName, User};
use crate::routes::json_body;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/missions", get(list_missions))
        .route("/api/missions/{id}/complete", post(complete_mission))
        .route("/api/character", get(get_character))
        .route("/api/character/stats/allocate", post(allocate_point))
}

// ─── User Profile ────────────────────────────────────────────

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub level: u32,
    pub xp: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_xp: u64,
    pub available_points: u32,
    pub stats: CharacterStats,
    pub rank: Rank,
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            level: user.level,
            xp: user.xp,
            total_xp: user.total_xp,
            available_points: user.available_points,
            stats: user.stats,
            rank: Rank::from_level(user.level),
            created_at: format_utc_rfc3339(user.created_at),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MeResponse {
    pub user: UserResponse,
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<MeResponse>> {
    let user = state.game.current_user(auth.user_id).await?;
    Ok(Json(MeResponse {
        user: UserResponse::from(&user),
    }))
}

// ─── Missions ────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MissionsResponse {
    pub missions: Vec<Mission>,
}

async fn list_missions(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<MissionsResponse>> {
    let missions = state.game.list_missions(auth.user_id).await?;
    Ok(Json(MissionsResponse { missions }))
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LevelUpResponse {
    pub previous_level: u32,
    pub new_level: u32,
    pub points_awarded: u32,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CompleteMissionResponse {
    pub mission: Mission,
    pub user: UserResponse,
    pub xp_gained: u32,
    /// Present only when the reward crossed a level boundary
    pub level_up: Option<LevelUpResponse>,
}

/// Complete a mission and collect its XP.
async fn complete_mission(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<CompleteMissionResponse>> {
    // A malformed ID can't name any mission.
    let mission_id = Uuid::parse_str(&id).map_err(|_| AppError::MissionUnavailable)?;

    let outcome = state
        .game
        .complete_mission(auth.user_id, mission_id, chrono::Utc::now())
        .await?;
    let reward = outcome.reward;

    let level_up = reward.leveled_up().then(|| LevelUpResponse {
        previous_level: reward.previous_level,
        new_level: reward.user.level,
        points_awarded: reward.points_awarded,
    });

    Ok(Json(CompleteMissionResponse {
        mission: outcome.mission,
        user: UserResponse::from(&reward.user),
        xp_gained: reward.xp_gained,
        level_up,
    }))
}

// ─── Character ───────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CharacterResponse {
    pub user: UserResponse,
    pub rank: Rank,
    pub progress: LevelProgress,
    pub achievements: Vec<Achievement>,
}

async fn get_character(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<CharacterResponse>> {
    let user = state.game.current_user(auth.user_id).await?;
    Ok(Json(CharacterResponse {
        rank: Rank::from_level(user.level),
        progress: LevelProgress::for_user(&user),
        achievements: Achievement::unlocked_by(&user),
        user: UserResponse::from(&user),
    }))
}

#[derive(Debug, Deserialize)]
pub struct AllocateRequest {
    pub stat: StatName,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AllocateResponse {
    pub user: UserResponse,
}

/// Spend one attribute point.
async fn allocate_point(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    payload: std::result::Result<Json<AllocateRequest>, JsonRejection>,
) -> Result<Json<AllocateResponse>> {
    let request = json_body(payload)?;
    let user = state.game.allocate_point(auth.user_id, request.stat).await?;
    Ok(Json(AllocateResponse {
        user: UserResponse::from(&user),
    }))
}
