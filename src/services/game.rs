// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Game service: registration, login, missions and character progression.
//!
//! Every operation that reads and rewrites a user's progression state runs
//! under that user's mutex, so two concurrent mission completions can never
//! both start from the same stale `total_xp`.
//!
//! The user locks and the registration lock live in process memory. They
//! serialize requests handled by one server process only; running several
//! instances against the same Firestore project gives up both guarantees.

use chrono::{DateTime, FixedOffset, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::mission::default_missions;
use crate::models::{Mission, StatName, User};
use crate::services::daily_reset::reset_if_stale;
use crate::services::password::{self, PasswordError};
use crate::services::progression::{self, RewardOutcome};

/// Per-user locks serializing progression updates within this process.
pub type UserLocks = Arc<DashMap<Uuid, Arc<Mutex<()>>>>;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub missions_reset: usize,
}

/// Result of a successful mission completion.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub mission: Mission,
    pub reward: RewardOutcome,
}

#[derive(Clone)]
pub struct GameService {
    db: Arc<dyn Store>,
    user_locks: UserLocks,
    registration_lock: Arc<Mutex<()>>,
    day_boundary: FixedOffset,
}

impl GameService {
    pub fn new(db: Arc<dyn Store>, day_boundary: FixedOffset) -> Self {
        Self {
            db,
            user_locks: Arc::new(DashMap::new()),
            registration_lock: Arc::new(Mutex::new(())),
            day_boundary,
        }
    }

    fn user_lock(&self, user_id: Uuid) -> Arc<Mutex<()>> {
        self.user_locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    // ─── Accounts ────────────────────────────────────────────────

    /// Create a user with default progression state and mission catalog.
    pub async fn register(&self, username: &str, password: &str, now: DateTime<Utc>) -> Result<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::BadRequest("Username must not be blank".to_string()));
        }

        let password_hash = hash_blocking(password.to_string()).await?;

        let _guard = self.registration_lock.lock().await;

        if self.db.get_user_by_username(username).await?.is_some() {
            return Err(AppError::DuplicateUsername);
        }

        // The user record claims the username, so it is written last.
        let user = User::new(username.to_string(), password_hash, now);
        let missions = default_missions(user.id, now);
        self.db.create_missions(&missions).await?;
        self.db.create_user(&user).await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            missions = missions.len(),
            "User registered"
        );

        Ok(user)
    }

    /// Verify credentials, then reopen stale daily missions.
    pub async fn login(&self, username: &str, password: &str, now: DateTime<Utc>) -> Result<LoginOutcome> {
        let Some(user) = self.db.get_user_by_username(username.trim()).await? else {
            let password = password.to_string();
            let _ = tokio::task::spawn_blocking(move || password::verify_dummy(&password)).await;
            tracing::debug!("Login rejected: unknown username");
            return Err(AppError::InvalidCredentials);
        };

        if !verify_blocking(password.to_string(), user.password_hash.clone()).await? {
            tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let missions_reset = self.reset_daily_missions(user.id, now).await?;

        tracing::info!(user_id = %user.id, missions_reset, "User logged in");

        Ok(LoginOutcome {
            user,
            missions_reset,
        })
    }

    pub async fn current_user(&self, user_id: Uuid) -> Result<User> {
        self.db
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
    }

    // ─── Missions ────────────────────────────────────────────────

    /// All of a user's missions: daily, then side, then main, oldest first.
    pub async fn list_missions(&self, user_id: Uuid) -> Result<Vec<Mission>> {
        let mut missions = self.db.get_missions_for_user(user_id).await?;
        missions.sort_by(|a, b| {
            a.mission_type
                .cmp(&b.mission_type)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.xp_reward.cmp(&b.xp_reward))
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(missions)
    }

    /// Reopen the user's daily missions whose last reset was on an earlier day.
    ///
    /// Returns the number of missions reset.
    pub async fn reset_daily_missions(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<usize> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        let local_now = now.with_timezone(&self.day_boundary);
        let mut reset_count = 0;

        for mission in self.db.get_missions_for_user(user_id).await? {
            if let Some(reset) = reset_if_stale(&mission, &local_now) {
                self.db.replace_mission(&reset).await?;
                reset_count += 1;
                tracing::debug!(user_id = %user_id, mission_id = %reset.id, "Daily mission reset");
            }
        }

        Ok(reset_count)
    }

    /// Complete a mission and award its XP to the owner.
    ///
    /// Missing, foreign and already completed missions are all reported as
    /// `MissionUnavailable`, and nothing is written.
    pub async fn complete_mission(
        &self,
        user_id: Uuid,
        mission_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<CompletionOutcome> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        let original = match self.db.get_mission(mission_id).await? {
            Some(m) if m.user_id == user_id && !m.completed => m,
            _ => return Err(AppError::MissionUnavailable),
        };
        let user = self.current_user(user_id).await?;

        let mut mission = original.clone();
        mission.completed = true;
        mission.completed_at = Some(now);

        let reward = progression::apply_mission_reward(&user, mission.xp_reward);

        self.db.replace_mission(&mission).await?;
        if let Err(e) = self.db.replace_user(&reward.user).await {
            // Reopen the mission so the XP can still be claimed.
            if let Err(rollback_err) = self.db.replace_mission(&original).await {
                tracing::error!(
                    error = %rollback_err,
                    mission_id = %mission_id,
                    "Failed to roll back mission completion"
                );
            }
            return Err(e);
        }

        tracing::info!(
            user_id = %user_id,
            mission_id = %mission_id,
            xp_gained = reward.xp_gained,
            total_xp = reward.user.total_xp,
            "Mission completed"
        );
        if reward.leveled_up() {
            tracing::info!(
                user_id = %user_id,
                previous_level = reward.previous_level,
                level = reward.user.level,
                points_awarded = reward.points_awarded,
                "Level up"
            );
        }

        Ok(CompletionOutcome { mission, reward })
    }

    // ─── Character ───────────────────────────────────────────────

    /// Spend one attribute point on `stat`.
    pub async fn allocate_point(&self, user_id: Uuid, stat: StatName) -> Result<User> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        let user = self.current_user(user_id).await?;
        let updated = progression::allocate_attribute_point(&user, stat)?;
        self.db.replace_user(&updated).await?;

        tracing::info!(
            user_id = %user_id,
            stat = %stat,
            value = updated.stats.get(stat),
            available_points = updated.available_points,
            "Attribute point allocated"
        );

        Ok(updated)
    }
}

async fn hash_blocking(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing task failed: {}", e)))?
        .map_err(password_error)
}

async fn verify_blocking(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password verification task failed: {}", e)))?
        .map_err(password_error)
}

fn password_error(err: PasswordError) -> AppError {
    AppError::Internal(anyhow::Error::new(err))
}
