//! In-memory admin sessions.
//!
//! The [`SessionStore`] is process-wide, single-owner state: tokens are issued at login, checked on every
//! authenticated request and reclaimed either lazily (an expired token is deleted the moment it is looked up) or in
//! bulk by the server's periodic sweep. Tokens are never renewed; once a session expires the admin logs in again.
//!
//! The map lives behind an `RwLock` so that the store can be shared across actix worker threads. No lock is ever
//! held across an await point.

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::{DateTime, Duration, Utc};
use log::debug;
use rand::RngCore;

use crate::db_types::Admin;

/// Token entropy in bytes. 32 bytes (256 bits) makes collisions and guessing negligible.
const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub admin_id: i64,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, sessions: RwLock::new(HashMap::new()) }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a fresh opaque token for the given admin. The token is the sole key to the session.
    pub fn issue(&self, admin: &Admin) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        let session = Session {
            admin_id: admin.id,
            username: admin.username.clone(),
            expires_at: Utc::now() + self.ttl,
        };
        self.write().insert(token.clone(), session);
        debug!("🔑️ Session issued for {} (expires in {}s)", admin.username, self.ttl.num_seconds());
        token
    }

    /// Returns the session only while `expires_at` lies in the future. An expired entry is deleted on the spot and
    /// treated as absent.
    pub fn validate(&self, token: &str) -> Option<Session> {
        let now = Utc::now();
        {
            let sessions = self.read();
            match sessions.get(token) {
                Some(session) if session.expires_at > now => return Some(session.clone()),
                Some(_) => {},
                None => return None,
            }
        }
        // Lazy expiry: the entry was present but stale.
        if let Some(session) = self.write().remove(token) {
            debug!("🔑️ Expired session for {} removed on access", session.username);
        }
        None
    }

    /// Deletes every expired session, returning how many were reclaimed. Runs on a fixed interval so that tokens
    /// that are never looked up again still get cleaned out.
    pub fn sweep(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.write();
        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at > now);
        before - sessions.len()
    }

    pub fn active_sessions(&self) -> usize {
        self.read().len()
    }

    // Lock poisoning is recovered rather than propagated: a panicking request thread must not take the whole
    // session map down with it.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Session>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Session>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}
