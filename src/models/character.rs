// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display-only character data derived from a user's progression state.
//!
//! Nothing here feeds back into progression: rank, level progress and
//! achievements are recomputed from the user record on every read.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::User;
use crate::services::progression::XP_PER_LEVEL;

/// Hunter rank banding by level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Rank {
    E,
    D,
    C,
    B,
    A,
    S,
}

impl Rank {
    pub fn from_level(level: u32) -> Self {
        match level {
            0..=9 => Rank::E,
            10..=19 => Rank::D,
            20..=29 => Rank::C,
            30..=39 => Rank::B,
            40..=49 => Rank::A,
            _ => Rank::S,
        }
    }
}

/// Progress through the current level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LevelProgress {
    pub current: u32,
    pub required: u32,
    pub percent: f64,
}

impl LevelProgress {
    pub fn for_user(user: &User) -> Self {
        let current = (user.total_xp % XP_PER_LEVEL) as u32;
        let required = XP_PER_LEVEL as u32;
        let percent = (f64::from(current) / f64::from(required) * 100.0).min(100.0);
        Self {
            current,
            required,
            percent,
        }
    }
}

const DEDICATED_HUNTER_LEVEL: u32 = 7;
const XP_COLLECTOR_TOTAL_XP: u64 = 5000;
const SPECIALIST_STAT_VALUE: u32 = 20;

/// Milestones shown on the character page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Achievement {
    /// Reached level 7
    DedicatedHunter,
    /// Accumulated 5000 lifetime XP
    XpCollector,
    /// Raised any single attribute to 20
    Specialist,
}

impl Achievement {
    /// All achievements `user` has unlocked, in display order.
    pub fn unlocked_by(user: &User) -> Vec<Achievement> {
        let mut unlocked = Vec::new();
        if user.level >= DEDICATED_HUNTER_LEVEL {
            unlocked.push(Achievement::DedicatedHunter);
        }
        if user.total_xp >= XP_COLLECTOR_TOTAL_XP {
            unlocked.push(Achievement::XpCollector);
        }
        if user.stats.max_value() >= SPECIALIST_STAT_VALUE {
            unlocked.push(Achievement::Specialist);
        }
        unlocked
    }
}
