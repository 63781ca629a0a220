// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progression engine: XP, levels and attribute points.
//!
//! Pure functions over [`User`] values. Persisting the result and
//! serializing concurrent updates for the same user is the caller's job
//! (see `GameService`).

use crate::models::{StatName, User};

/// XP required to advance one level.
pub const XP_PER_LEVEL: u64 = 1000;
/// Attribute points awarded per level gained.
pub const POINTS_PER_LEVEL: u32 = 2;
/// Attribute points a new user starts with.
pub const STARTING_POINTS: u32 = 5;
/// Initial value of every attribute.
pub const STARTING_STAT_VALUE: u32 = 10;

/// Errors from progression operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("No attribute points available")]
    InsufficientPoints,
}

/// Result of applying a mission reward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardOutcome {
    pub user: User,
    pub xp_gained: u32,
    pub previous_level: u32,
    pub levels_gained: u32,
    pub points_awarded: u32,
}

impl RewardOutcome {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Level for a lifetime XP total.
pub fn level_for_total_xp(total_xp: u64) -> u32 {
    u32::try_from(total_xp / XP_PER_LEVEL + 1).unwrap_or(u32::MAX)
}

/// Apply `xp_reward` to `user`.
///
/// Only `xp`, `total_xp`, `level` and `available_points` change. Levels
/// never decrease, so `available_points` never decreases either.
pub fn apply_mission_reward(user: &User, xp_reward: u32) -> RewardOutcome {
    let total_xp = user.total_xp.saturating_add(u64::from(xp_reward));
    let level = level_for_total_xp(total_xp);
    let levels_gained = level.saturating_sub(user.level);
    let points_awarded = levels_gained.saturating_mul(POINTS_PER_LEVEL);

    let mut updated = user.clone();
    updated.total_xp = total_xp;
    updated.xp = (total_xp % XP_PER_LEVEL) as u32;
    updated.level = level;
    updated.available_points = user.available_points.saturating_add(points_awarded);

    RewardOutcome {
        user: updated,
        xp_gained: xp_reward,
        previous_level: user.level,
        levels_gained,
        points_awarded,
    }
}

/// Spend one attribute point on `stat`.
pub fn allocate_attribute_point(user: &User, stat: StatName) -> Result<User, ProgressionError> {
    if user.available_points == 0 {
        return Err(ProgressionError::InsufficientPoints);
    }

    let mut updated = user.clone();
    *updated.stats.get_mut(stat) += 1;
    updated.available_points -= 1;
    Ok(updated)
}
