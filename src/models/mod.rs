// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod character;
pub mod mission;
pub mod user;

pub use character::{Achievement, LevelProgress, Rank};
pub use mission::{Mission, MissionType};
pub use user::{CharacterStats, StatName, User};
