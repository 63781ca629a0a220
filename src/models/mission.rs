// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mission model and the default mission catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Mission category. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MissionType {
    Daily,
    Side,
    Main,
}

/// A rewardable unit of work owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Mission {
    /// Opaque mission ID (also used as document ID)
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    /// Icon class name for the frontend
    pub icon: String,
    #[serde(rename = "type")]
    pub mission_type: MissionType,
    pub xp_reward: u32,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    /// Last time the completion window was re-anchored (daily missions only)
    pub reset_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Mission {
    pub fn is_daily(&self) -> bool {
        self.mission_type == MissionType::Daily
    }
}

/// Template used to seed a new user's missions.
#[derive(Debug, Clone, Copy)]
pub struct MissionTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub mission_type: MissionType,
    pub xp_reward: u32,
    pub icon: &'static str,
}

impl MissionTemplate {
    /// Instantiate this template for `user_id`.
    pub fn instantiate(&self, user_id: Uuid, now: DateTime<Utc>) -> Mission {
        Mission {
            id: Uuid::new_v4(),
            user_id,
            title: self.title.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            mission_type: self.mission_type,
            xp_reward: self.xp_reward,
            completed: false,
            completed_at: None,
            reset_date: (self.mission_type == MissionType::Daily).then_some(now),
            created_at: now,
        }
    }
}

/// Missions created for every new user at registration.
pub const DEFAULT_CATALOG: [MissionTemplate; 8] = [
    MissionTemplate {
        title: "Brush Teeth",
        description: "Morning and evening oral hygiene",
        mission_type: MissionType::Daily,
        xp_reward: 25,
        icon: "fas fa-tooth",
    },
    MissionTemplate {
        title: "Take a Shower",
        description: "Daily personal hygiene",
        mission_type: MissionType::Daily,
        xp_reward: 50,
        icon: "fas fa-shower",
    },
    MissionTemplate {
        title: "Exercise (30min)",
        description: "Daily physical activity",
        mission_type: MissionType::Daily,
        xp_reward: 75,
        icon: "fas fa-dumbbell",
    },
    MissionTemplate {
        title: "Drink 2L of Water",
        description: "Stay properly hydrated",
        mission_type: MissionType::Daily,
        xp_reward: 30,
        icon: "fas fa-glass-water",
    },
    MissionTemplate {
        title: "Meditate (15min)",
        description: "Mental well-being",
        mission_type: MissionType::Daily,
        xp_reward: 40,
        icon: "fas fa-om",
    },
    MissionTemplate {
        title: "Read for 1 Hour",
        description: "Intellectual development",
        mission_type: MissionType::Side,
        xp_reward: 100,
        icon: "fas fa-book",
    },
    MissionTemplate {
        title: "Tidy Your Room",
        description: "Keep your surroundings clean",
        mission_type: MissionType::Side,
        xp_reward: 150,
        icon: "fas fa-broom",
    },
    MissionTemplate {
        title: "Finish the Main Project",
        description: "Complete the most important project of the week",
        mission_type: MissionType::Main,
        xp_reward: 500,
        icon: "fas fa-crown",
    },
];

/// Build the default mission set for a new user.
pub fn default_missions(user_id: Uuid, now: DateTime<Utc>) -> Vec<Mission> {
    DEFAULT_CATALOG
        .iter()
        .map(|template| template.instantiate(user_id, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_composition() {
        let user_id = Uuid::new_v4();
        let missions = default_missions(user_id, Utc::now());

        let count = |t: MissionType| missions.iter().filter(|m| m.mission_type == t).count();
        assert_eq!(missions.len(), 8);
        assert_eq!(count(MissionType::Daily), 5);
        assert_eq!(count(MissionType::Side), 2);
        assert_eq!(count(MissionType::Main), 1);
        assert!(missions.iter().all(|m| m.user_id == user_id && !m.completed));
        assert!(missions.iter().all(|m| m.xp_reward > 0));
    }

    #[test]
    fn test_only_daily_missions_get_reset_date() {
        let now = Utc::now();
        for mission in default_missions(Uuid::new_v4(), now) {
            if mission.is_daily() {
                assert_eq!(mission.reset_date, Some(now));
            } else {
                assert_eq!(mission.reset_date, None);
            }
        }
    }

    #[test]
    fn test_mission_type_serializes_as_type_field() {
        let mission = DEFAULT_CATALOG[7].instantiate(Uuid::new_v4(), Utc::now());
        let json = serde_json::to_value(&mission).unwrap();

        assert_eq!(json["type"], "main");
        assert_eq!(json["xp_reward"], 500);
        assert!(json["completed_at"].is_null());
    }
}
