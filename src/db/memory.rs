// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store (default backend, also used by tests).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::{MissionStore, UserStore};
use crate::error::AppError;
use crate::models::{Mission, User};

/// In-memory store backed by hash maps.
#[derive(Debug, Default, Clone)]
pub struct MemoryDb {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    missions: Arc<RwLock<HashMap<Uuid, Mission>>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryDb {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(AppError::DuplicateUsername);
        }
        if users.contains_key(&user.id) {
            return Err(AppError::Database(format!("User {} already exists", user.id)));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn replace_user(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!("User {} not found", user.id))),
        }
    }
}

#[async_trait]
impl MissionStore for MemoryDb {
    async fn get_mission(&self, id: Uuid) -> Result<Option<Mission>, AppError> {
        Ok(self.missions.read().await.get(&id).cloned())
    }

    async fn get_missions_for_user(&self, user_id: Uuid) -> Result<Vec<Mission>, AppError> {
        let missions = self.missions.read().await;
        Ok(missions
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_missions(&self, new_missions: &[Mission]) -> Result<(), AppError> {
        let mut missions = self.missions.write().await;
        if let Some(dup) = new_missions.iter().find(|m| missions.contains_key(&m.id)) {
            return Err(AppError::Database(format!("Mission {} already exists", dup.id)));
        }
        for mission in new_missions {
            missions.insert(mission.id, mission.clone());
        }
        Ok(())
    }

    async fn replace_mission(&self, mission: &Mission) -> Result<(), AppError> {
        let mut missions = self.missions.write().await;
        match missions.get_mut(&mission.id) {
            Some(existing) => {
                *existing = mission.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "Mission {} not found",
                mission.id
            ))),
        }
    }
}
