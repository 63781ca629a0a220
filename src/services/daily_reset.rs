// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily mission reset policy.
//!
//! A daily mission is reopened when its last reset fell on an earlier
//! calendar day than `now`. Days are compared in the time zone carried by
//! `now`, so callers pick the day boundary by converting `now` first.
//! This is evaluated on login, not on a timer: several missed days
//! collapse into a single reset.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::Mission;

/// Whether `mission` should be reopened at `now`.
pub fn needs_reset<Tz: TimeZone>(mission: &Mission, now: &DateTime<Tz>) -> bool {
    if !mission.is_daily() {
        return false;
    }

    let anchor = mission.reset_date.unwrap_or_default();
    let reset_day = anchor.with_timezone(&now.timezone()).date_naive();
    reset_day < now.date_naive()
}

/// The reopened mission, or `None` if it is not stale.
pub fn reset_if_stale<Tz: TimeZone>(mission: &Mission, now: &DateTime<Tz>) -> Option<Mission> {
    if !needs_reset(mission, now) {
        return None;
    }

    let mut reset = mission.clone();
    reset.completed = false;
    reset.completed_at = None;
    reset.reset_date = Some(now.with_timezone(&Utc));
    Some(reset)
}

/// Apply the reset policy to a user's full mission set.
pub fn reset_daily_missions<Tz: TimeZone>(
    missions: Vec<Mission>,
    now: &DateTime<Tz>,
) -> Vec<Mission> {
    missions
        .into_iter()
        .map(|mission| reset_if_stale(&mission, now).unwrap_or(mission))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mission::DEFAULT_CATALOG;
    use crate::models::MissionType;
    use chrono::{Duration, FixedOffset};
    use uuid::Uuid;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn completed_mission(mission_type: MissionType, reset_date: Option<DateTime<Utc>>) -> Mission {
        let template = DEFAULT_CATALOG
            .iter()
            .find(|t| t.mission_type == mission_type)
            .unwrap();
        let created = at("2026-01-01T08:00:00Z");
        let mut mission = template.instantiate(Uuid::new_v4(), created);
        mission.completed = true;
        mission.completed_at = Some(created);
        mission.reset_date = reset_date;
        mission
    }

    #[test]
    fn test_daily_mission_reset_after_day_change() {
        let now = at("2026-03-10T09:00:00Z");
        let mission = completed_mission(MissionType::Daily, Some(now - Duration::days(1)));

        let reset = reset_if_stale(&mission, &now).expect("should reset");

        assert!(!reset.completed);
        assert_eq!(reset.completed_at, None);
        assert_eq!(reset.reset_date, Some(now));
        assert_eq!(reset.id, mission.id);
        assert_eq!(reset.xp_reward, mission.xp_reward);
    }

    #[test]
    fn test_daily_mission_earlier_today_unchanged() {
        let now = at("2026-03-10T23:59:00Z");
        let mission = completed_mission(MissionType::Daily, Some(at("2026-03-10T00:00:00Z")));

        assert!(reset_if_stale(&mission, &now).is_none());
    }

    #[test]
    fn test_calendar_day_not_rolling_window() {
        // Two minutes apart, but across midnight.
        let now = at("2026-03-10T00:01:00Z");
        let mission = completed_mission(MissionType::Daily, Some(at("2026-03-09T23:59:00Z")));

        assert!(needs_reset(&mission, &now));
    }

    #[test]
    fn test_day_boundary_follows_time_zone_of_now() {
        let utc_now = at("2026-03-10T02:00:00Z");
        let mission = completed_mission(MissionType::Daily, Some(at("2026-03-09T23:00:00Z")));

        // In UTC this is a new day; at UTC-03:00 both instants fall on March 9.
        let brasilia = FixedOffset::west_opt(3 * 3600).unwrap();
        assert!(needs_reset(&mission, &utc_now));
        assert!(!needs_reset(&mission, &utc_now.with_timezone(&brasilia)));
    }

    #[test]
    fn test_missing_reset_date_treated_as_epoch() {
        let now = at("2026-03-10T09:00:00Z");
        let mission = completed_mission(MissionType::Daily, None);

        assert!(needs_reset(&mission, &now));
    }

    #[test]
    fn test_many_missed_days_collapse_into_one_reset() {
        let now = at("2026-03-10T09:00:00Z");
        let mission = completed_mission(MissionType::Daily, Some(now - Duration::days(30)));

        let reset = reset_if_stale(&mission, &now).unwrap();
        assert_eq!(reset.reset_date, Some(now));
        assert!(reset_if_stale(&reset, &now).is_none());
    }

    #[test]
    fn test_side_and_main_missions_never_reset() {
        let now = at("2026-03-10T09:00:00Z");
        let long_ago = Some(now - Duration::days(365));

        for mission_type in [MissionType::Side, MissionType::Main] {
            let mission = completed_mission(mission_type, long_ago);
            assert!(reset_if_stale(&mission, &now).is_none());
            let mission = completed_mission(mission_type, None);
            assert!(reset_if_stale(&mission, &now).is_none());
        }
    }

    #[test]
    fn test_reset_daily_missions_touches_only_stale_daily() {
        let now = at("2026-03-10T09:00:00Z");
        let yesterday = Some(now - Duration::days(1));
        let missions = vec![
            completed_mission(MissionType::Daily, yesterday),
            completed_mission(MissionType::Daily, Some(now - Duration::hours(1))),
            completed_mission(MissionType::Side, yesterday),
            completed_mission(MissionType::Main, yesterday),
        ];

        let result = reset_daily_missions(missions.clone(), &now);

        assert!(!result[0].completed);
        assert_eq!(result[1], missions[1]);
        assert_eq!(result[2], missions[2]);
        assert_eq!(result[3], missions[3]);
    }
}
