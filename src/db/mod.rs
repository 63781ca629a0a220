// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer.
//!
//! Records are always replaced whole; there are no partial-field updates.
//! Serializing concurrent read-modify-write cycles is left to the caller.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{Mission, User};
use async_trait::async_trait;
use uuid::Uuid;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const MISSIONS: &str = "missions";
}

/// Identity store.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Insert a new user. Fails with `DuplicateUsername` if the name is taken.
    async fn create_user(&self, user: &User) -> Result<(), AppError>;

    /// Replace an existing user record.
    async fn replace_user(&self, user: &User) -> Result<(), AppError>;
}

/// Mission store.
#[async_trait]
pub trait MissionStore: Send + Sync {
    async fn get_mission(&self, id: Uuid) -> Result<Option<Mission>, AppError>;

    async fn get_missions_for_user(&self, user_id: Uuid) -> Result<Vec<Mission>, AppError>;

    async fn create_missions(&self, missions: &[Mission]) -> Result<(), AppError>;

    /// Replace an existing mission record.
    async fn replace_mission(&self, mission: &Mission) -> Result<(), AppError>;
}

/// Combined store used by the application.
pub trait Store: UserStore + MissionStore {}

impl<T: UserStore + MissionStore> Store for T {}
