// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::services::progression::{STARTING_POINTS, STARTING_STAT_VALUE};

/// User account and progression state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque user ID (also used as document ID)
    pub id: Uuid,
    /// Unique login name
    pub username: String,
    /// Argon2id PHC string
    pub password_hash: String,
    /// Current level (always `total_xp / XP_PER_LEVEL + 1`)
    pub level: u32,
    /// XP accumulated within the current level
    pub xp: u32,
    /// Lifetime XP
    pub total_xp: u64,
    /// Unspent attribute points
    pub available_points: u32,
    /// Character attributes
    pub stats: CharacterStats,
    /// When the account was registered
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A freshly registered user with default progression state.
    pub fn new(username: String, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            level: 1,
            xp: 0,
            total_xp: 0,
            available_points: STARTING_POINTS,
            stats: CharacterStats::default(),
            created_at: now,
        }
    }
}

/// The four character attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CharacterStats {
    pub strength: u32,
    pub agility: u32,
    pub intelligence: u32,
    pub vitality: u32,
}

impl Default for CharacterStats {
    fn default() -> Self {
        Self {
            strength: STARTING_STAT_VALUE,
            agility: STARTING_STAT_VALUE,
            intelligence: STARTING_STAT_VALUE,
            vitality: STARTING_STAT_VALUE,
        }
    }
}

impl CharacterStats {
    pub fn get(&self, stat: StatName) -> u32 {
        match stat {
            StatName::Strength => self.strength,
            StatName::Agility => self.agility,
            StatName::Intelligence => self.intelligence,
            StatName::Vitality => self.vitality,
        }
    }

    pub fn get_mut(&mut self, stat: StatName) -> &mut u32 {
        match stat {
            StatName::Strength => &mut self.strength,
            StatName::Agility => &mut self.agility,
            StatName::Intelligence => &mut self.intelligence,
            StatName::Vitality => &mut self.vitality,
        }
    }

    /// Highest single attribute value.
    pub fn max_value(&self) -> u32 {
        StatName::ALL
            .iter()
            .map(|&stat| self.get(stat))
            .max()
            .unwrap_or(0)
    }
}

/// Name of a character attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum StatName {
    Strength,
    Agility,
    Intelligence,
    Vitality,
}

impl StatName {
    pub const ALL: [StatName; 4] = [
        StatName::Strength,
        StatName::Agility,
        StatName::Intelligence,
        StatName::Vitality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatName::Strength => "strength",
            StatName::Agility => "agility",
            StatName::Intelligence => "intelligence",
            StatName::Vitality => "vitality",
        }
    }
}

impl std::fmt::Display for StatName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("jinwoo".to_string(), "hash".to_string(), Utc::now());

        assert_eq!(user.level, 1);
        assert_eq!(user.xp, 0);
        assert_eq!(user.total_xp, 0);
        assert_eq!(user.available_points, 5);
        assert_eq!(
            user.stats,
            CharacterStats {
                strength: 10,
                agility: 10,
                intelligence: 10,
                vitality: 10,
            }
        );
    }

    #[test]
    fn test_stat_name_deserializes_lowercase() {
        let stat: StatName = serde_json::from_str("\"intelligence\"").unwrap();
        assert_eq!(stat, StatName::Intelligence);
        assert!(serde_json::from_str::<StatName>("\"charisma\"").is_err());
    }

    #[test]
    fn test_get_mut_targets_single_stat() {
        let mut stats = CharacterStats::default();
        *stats.get_mut(StatName::Agility) += 3;

        assert_eq!(stats.agility, 13);
        assert_eq!(stats.strength, 10);
        assert_eq!(stats.max_value(), 13);
    }
}
