// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-side session registry.
//!
//! Session JWTs are only honored while their session ID is registered
//! here, which is what makes logout effective before the token expires.
//! Sessions live in process memory, so a restart signs everyone out.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// A live login session.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Registry of live sessions, shared across requests.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session for `user_id`, returning its ID and expiry.
    pub fn create(&self, user_id: Uuid, now: DateTime<Utc>, ttl: Duration) -> (Uuid, DateTime<Utc>) {
        self.purge_expired(now);

        let session_id = Uuid::new_v4();
        let expires_at = now + ttl;
        self.sessions.insert(
            session_id,
            Session {
                user_id,
                expires_at,
            },
        );
        (session_id, expires_at)
    }

    /// Whether `session_id` is live and belongs to `user_id`.
    pub fn is_active(&self, session_id: Uuid, user_id: Uuid, now: DateTime<Utc>) -> bool {
        let expired = match self.sessions.get(&session_id) {
            Some(session) if session.user_id != user_id => return false,
            Some(session) => session.expires_at <= now,
            None => return false,
        };

        if expired {
            self.sessions.remove(&session_id);
        }
        !expired
    }

    /// Remove a session. Returns `true` if it existed.
    pub fn revoke(&self, session_id: Uuid) -> bool {
        self.sessions.remove(&session_id).is_some()
    }

    /// Drop expired sessions. Returns how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.expires_at > now);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
