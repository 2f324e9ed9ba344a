pub use crate::models::session_models::{PracticeSession, SessionCache};
use crate::models::session_models::SessionStatus;

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Duration;

static SINGLETON_SESSION_CACHE: OnceCell<SessionCache> = OnceCell::new();

impl SessionCache {
    pub fn new() -> &'static Self {
        if SINGLETON_SESSION_CACHE.get().is_none() {
            let in_memory_sessions = Self {
                sessions: Arc::new(DashMap::new()),
            };
            SINGLETON_SESSION_CACHE.set(in_memory_sessions).ok();
        }
        SINGLETON_SESSION_CACHE.get().unwrap()
    }

    pub fn insert_session(&self, session: PracticeSession) {
        self.sessions.insert(session.session_id.clone(), session);
    }

    pub fn get_session(
        &self,
        session_id: &str,
    ) -> Option<dashmap::mapref::one::Ref<String, PracticeSession>> {
        self.sessions.get(session_id)
    }

    pub fn get_session_mut(
        &self,
        session_id: &str,
    ) -> Option<dashmap::mapref::one::RefMut<String, PracticeSession>> {
        self.sessions.get_mut(session_id)
    }

    pub fn remove_session(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// One clock tick for `session_id`. `elapsed_ms` is the measured wall-clock
    /// delta since the previous tick. Returns None when the session is gone.
    pub fn tick_session(&self, session_id: &str, elapsed_ms: u64) -> Option<SessionStatus> {
        self.sessions
            .get_mut(session_id)
            .map(|mut session| session.tick(elapsed_ms))
    }

    /// Drops sessions that have sat in the Expired state longer than `linger`.
    /// Expired sessions are kept around that long so late Run/Submit calls see
    /// a precise "expired" failure instead of "not found".
    pub fn reap_expired(&self, linger: Duration) -> Vec<String> {
        let mut reaped = Vec::new();
        self.sessions.retain(|session_id, session| {
            let keep = match session.expired_at {
                Some(expired_at) => expired_at.elapsed() < linger,
                None => true,
            };
            if !keep {
                reaped.push(session_id.clone());
            }
            keep
        });
        reaped
    }
}
