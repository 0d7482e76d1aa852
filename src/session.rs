//! Session store.
//!
//! Holds the authenticated session for the lifetime of the process. It is
//! populated at login, cleared at logout and handed explicitly to every
//! component that needs the access token.

use crate::api::Session;
use log::*;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared handle to the current session. Clones observe the same session.
///
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    /// Return an empty store.
    ///
    pub fn new() -> Self {
        SessionStore::default()
    }

    /// Return a store restored from a persisted access token.
    ///
    pub fn from_token(access_token: Option<String>) -> Self {
        let store = SessionStore::new();
        if let Some(access_token) = access_token {
            store.set(Session {
                access_token,
                user: None,
            });
        }
        store
    }

    pub fn get(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn set(&self, session: Session) {
        debug!(
            "Storing session for {}...",
            session
                .user
                .as_ref()
                .map(|u| u.username.as_str())
                .unwrap_or("restored token")
        );
        *self.write() = Some(session);
    }

    pub fn clear(&self) {
        debug!("Clearing session...");
        *self.write() = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.access_token.clone())
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
