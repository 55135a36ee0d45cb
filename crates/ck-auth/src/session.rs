//! Session management
//!
//! A session binds an authenticated identity to a random id and the access
//! token the hosted service issued. Sessions live in memory and carry the
//! session-scoped project workspace's lifetime with them.

use chrono::{DateTime, Utc};
use ck_models::Identity;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found")]
    NotFound,
    #[error("Session expired")]
    Expired,
    #[error("Session invalid")]
    Invalid,
}

/// An authenticated session
#[derive(Debug, Clone)]
pub struct Session {
    /// Random session id
    pub id: String,
    /// The signed-in identity
    pub identity: Identity,
    /// Opaque access token from the identity service
    pub access_token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session for a signed-in identity
    pub fn new(identity: Identity, access_token: impl Into<String>, lifetime_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            id: generate_session_id(),
            identity,
            access_token: access_token.into(),
            created_at: now,
            expires_at: now + chrono::Duration::seconds(lifetime_seconds),
        }
    }

    pub fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }

    pub fn user_id(&self) -> Uuid {
        self.identity.id
    }
}

/// Generate a random session id
fn generate_session_id() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    const SESSION_ID_LENGTH: usize = 64;

    let mut rng = rand::rng();
    (0..SESSION_ID_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Session store trait
pub trait SessionStore: Send + Sync {
    /// Get a session by id (expired sessions are not returned)
    fn get(&self, session_id: &str) -> Option<Session>;

    /// Store a session
    fn set(&self, session: Session) -> Result<(), SessionError>;

    /// Delete a session (sign-out)
    fn delete(&self, session_id: &str) -> Result<(), SessionError>;

    /// Clean up expired sessions, returning the number removed
    fn cleanup_expired(&self) -> Result<usize, SessionError>;
}

/// In-memory session store
pub struct MemorySessionStore {
    sessions: std::sync::RwLock<HashMap<String, Session>>,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: std::sync::RwLock::new(HashMap::new()),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, session_id: &str) -> Option<Session> {
        let sessions = self.sessions.read().ok()?;
        sessions.get(session_id).cloned().filter(|s| s.is_valid())
    }

    fn set(&self, session: Session) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::Invalid)?;
        sessions.insert(session.id.clone(), session);
        Ok(())
    }

    fn delete(&self, session_id: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::Invalid)?;
        sessions.remove(session_id);
        Ok(())
    }

    fn cleanup_expired(&self) -> Result<usize, SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::Invalid)?;
        let now = Utc::now();
        let to_remove: Vec<String> = sessions
            .iter()
            .filter(|(_, s)| s.expires_at < now)
            .map(|(k, _)| k.clone())
            .collect();

        let count = to_remove.len();
        for key in to_remove {
            sessions.remove(&key);
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ck_models::UserRole;

    fn identity() -> Identity {
        Identity::new(
            Uuid::new_v4(),
            "alice@university.edu",
            "Alice Johnson",
            UserRole::Student,
        )
    }

    #[test]
    fn test_session_creation() {
        let session = Session::new(identity(), "token", 3600);
        assert!(session.is_valid());
        assert_eq!(session.id.len(), 64);
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::new();
        let session = Session::new(identity(), "token", 3600);
        let session_id = session.id.clone();

        store.set(session).unwrap();
        assert!(store.get(&session_id).is_some());

        store.delete(&session_id).unwrap();
        assert!(store.get(&session_id).is_none());
    }

    #[test]
    fn test_expired_sessions_not_returned() {
        let store = MemorySessionStore::new();
        let session = Session::new(identity(), "token", -1);
        let session_id = session.id.clone();

        store.set(session).unwrap();
        assert!(store.get(&session_id).is_none());
        assert_eq!(store.cleanup_expired().unwrap(), 1);
    }
}
