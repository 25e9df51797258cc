use std::sync::{Arc, RwLock};
use svcdesk_core::session::{AccessToken, Session, SessionStore};

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    current: RwLock<Option<Arc<Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `session`.
    pub fn with_session(session: Session) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(session))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<Arc<Session>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&self, session: Session) {
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Arc::new(session));
    }

    fn clear(&self) {
        self.current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
    }

    fn clear_if_current(&self, token: &AccessToken) -> bool {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if current.as_ref().is_some_and(|s| &s.token == token) {
            *current = None;
            true
        } else {
            false
        }
    }
}
