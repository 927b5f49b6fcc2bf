use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::CacheStore;

/// Store key for the persisted session
const SESSION_KEY: &str = "session";

/// Maximum session age before the UI prompts for a fresh login.
/// The server's 401 remains the source of truth; this only avoids
/// starting a page on a token that is certainly dead.
const SESSION_EXPIRY_HOURS: i64 = 12;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub member_id: i64,
    pub is_admin: bool,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(token: String, member_id: i64, is_admin: bool, username: String) -> Self {
        Self {
            token,
            member_id,
            is_admin,
            username,
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        let expiry = self.created_at + Duration::hours(SESSION_EXPIRY_HOURS);
        Utc::now() > expiry
    }
}

/// Session state persisted through the injected cache store.
#[derive(Default)]
pub struct Session {
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the session from the store. Returns true when a non-expired
    /// session was found.
    pub fn load(&mut self, store: &dyn CacheStore) -> bool {
        let Some(raw) = store.get(SESSION_KEY) else {
            return false;
        };
        match serde_json::from_str::<SessionData>(&raw) {
            Ok(data) if !data.is_expired() => {
                self.data = Some(data);
                true
            }
            _ => false,
        }
    }

    /// Persist the session to the store
    pub fn save(&self, store: &dyn CacheStore) -> Result<()> {
        if let Some(ref data) = self.data {
            let raw = serde_json::to_string_pretty(data).context("Failed to encode session")?;
            store.set(SESSION_KEY, &raw)?;
        }
        Ok(())
    }

    /// Drop the session and every cached snapshot. Called on logout and
    /// on a 401 from the server.
    pub fn clear(&mut self, store: &dyn CacheStore) -> Result<()> {
        self.data = None;
        store.clear()
    }

    /// Update session with new data
    pub fn update(&mut self, data: SessionData) {
        self.data = Some(data);
    }

    /// Get the bearer token if a session exists
    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.token.as_str())
    }

    pub fn member_id(&self) -> Option<i64> {
        self.data.as_ref().map(|d| d.member_id)
    }

    pub fn is_admin(&self) -> bool {
        self.data.as_ref().map(|d| d.is_admin).unwrap_or(false)
    }

    /// Check if session is valid (exists and not expired)
    pub fn is_valid(&self) -> bool {
        self.data.as_ref().map(|d| !d.is_expired()).unwrap_or(false)
    }
}
