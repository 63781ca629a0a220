// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod daily_reset;
pub mod game;
pub mod password;
pub mod progression;
pub mod sessions;

pub use game::{CompletionOutcome, GameService, LoginOutcome, UserLocks};
pub use progression::{ProgressionError, RewardOutcome};
pub use sessions::SessionStore;
