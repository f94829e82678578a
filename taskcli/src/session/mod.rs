// taskcli/src/session/mod.rs
//! # Session Module
//!
//! The single active login (`task_management_auth`) and the list of demo
//! users created from this client (`created_users`).

pub mod storage;


use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::models::User;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};

pub const SESSION_KEY: &str = "task_management_auth";
pub const CREATED_USERS_KEY: &str = "created_users";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
    pub token: String,
    /// Epoch seconds; `None` never expires
    #[serde(rename = "tokenExpiry", default)]
    pub token_expiry: Option<i64>,
}

impl Session {
    /// Expired only when the expiry is strictly before `now`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        matches!(self.token_expiry, Some(expiry) if expiry < now)
    }
}

/// Lifecycle of the stored session as seen at one instant.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Absent,
    Valid(Session),
    Expired,
}

/// A locally registered demo account, remembered with its password.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DemoUser {
    #[serde(flatten)]
    pub user: User,
    pub password: String,
}

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Replaces any prior session.
    pub fn save(
        &self,
        user: User,
        token: String,
        token_expiry: Option<i64>,
    ) -> Result<Session, StorageError> {
        let session = Session {
            user,
            token,
            token_expiry,
        };
        let encoded = serde_json::to_string(&session).map_err(|source| StorageError::Encode {
            key: SESSION_KEY.to_string(),
            source,
        })?;
        self.storage.set(SESSION_KEY, &encoded)?;

        info!(user_id = session.user.id, role = %session.user.role, "Saved session");
        Ok(session)
    }

    /// The stored session regardless of expiry. Unparseable data reads as absent.
    pub fn read(&self) -> Option<Session> {
        let raw = self.storage.get(SESSION_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(error = %e, "Stored session is unreadable; treating as logged out");
                None
            }
        }
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(SESSION_KEY)?;
        debug!("Cleared session");
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state_at(Utc::now().timestamp())
    }

    /// Reading an expired session clears it.
    pub fn state_at(&self, now: i64) -> SessionState {
        match self.read() {
            None => SessionState::Absent,
            Some(session) if session.is_expired_at(now) => {
                info!(user_id = session.user.id, "Session expired");
                if let Err(e) = self.clear() {
                    warn!(error = %e, "Failed to clear expired session");
                }
                SessionState::Expired
            }
            Some(session) => SessionState::Valid(session),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now().timestamp())
    }

    pub fn is_valid_at(&self, now: i64) -> bool {
        matches!(self.state_at(now), SessionState::Valid(_))
    }

    pub fn current_user(&self) -> Option<User> {
        self.read().map(|s| s.user)
    }

    pub fn current_token(&self) -> Option<String> {
        self.read().map(|s| s.token)
    }

    /// Token of a session that is still valid now.
    pub fn valid_token(&self) -> Option<String> {
        match self.state() {
            SessionState::Valid(session) => Some(session.token),
            _ => None,
        }
    }

    /// Appends to the demo user list and returns the whole list.
    pub fn save_created_user(
        &self,
        user: User,
        password: String,
    ) -> Result<Vec<DemoUser>, StorageError> {
        let mut users = self.created_users();
        users.push(DemoUser { user, password });

        let encoded = serde_json::to_string(&users).map_err(|source| StorageError::Encode {
            key: CREATED_USERS_KEY.to_string(),
            source,
        })?;
        self.storage.set(CREATED_USERS_KEY, &encoded)?;
        Ok(users)
    }

    pub fn created_users(&self) -> Vec<DemoUser> {
        let Some(raw) = self.storage.get(CREATED_USERS_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Stored demo user list is unreadable; ignoring it");
            Vec::new()
        })
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
