// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Life RPG: a habit tracker that plays like a role-playing game
//!
//! This crate provides the backend API: user accounts, XP-rewarding
//! missions with daily resets, and character levels and attributes.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Store;
use services::{GameService, SessionStore};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub game: GameService,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn Store>) -> Self {
        let game = GameService::new(db, config.day_boundary);
        Self {
            config,
            game,
            sessions: SessionStore::new(),
        }
    }
}
