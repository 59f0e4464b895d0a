//! Per-user session state.
//!
//! Each session owns one [`ListStore`] and at most one pending flash message.
//! A session starts on first access but is only registered in the
//! [`SessionStore`] once it holds something, so read-only clients leave no
//! trace. Registered sessions live until idle for longer than the configured
//! TTL.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::ListStore;

/// Whether a flash message reports success or failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

/// A one-shot status message shown on the next rendered page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

/// Everything a single user has stored.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub lists: ListStore,
    flash: Option<Flash>,
}

impl Session {
    /// Queue a success message, replacing any pending one.
    pub fn flash_success(&mut self, message: impl Into<String>) {
        self.flash = Some(Flash {
            kind: FlashKind::Success,
            message: message.into(),
        });
    }

    /// Queue an error message, replacing any pending one.
    pub fn flash_error(&mut self, message: impl Into<String>) {
        self.flash = Some(Flash {
            kind: FlashKind::Error,
            message: message.into(),
        });
    }

    /// Remove and return the pending message.
    pub fn take_flash(&mut self) -> Option<Flash> {
        self.flash.take()
    }

    /// True until the session holds a list or a pending message.
    pub fn is_blank(&self) -> bool {
        self.lists.is_empty() && self.flash.is_none()
    }
}

/// Shared handle to one session, handed to every request of that session.
///
/// Concurrent requests for the same session are serialised by the lock;
/// the last write wins.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle(Arc<Mutex<Session>>);

impl SessionHandle {
    fn lock(&self) -> MutexGuard<'_, Session> {
        // Session data is plain values, so a panicked writer cannot leave it
        // half-built in a way later requests care about.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self.lock();
        f(&mut *session)
    }
}

struct SessionEntry {
    session: SessionHandle,
    last_seen: Instant,
}

/// Result of resolving a request's session.
#[derive(Debug, Clone)]
pub struct LoadedSession {
    pub id: Uuid,
    pub handle: SessionHandle,
    /// True when no live session matched and a fresh, not yet registered,
    /// one was started.
    pub created: bool,
}

/// Registry of live sessions keyed by session id.
#[derive(Clone)]
pub struct SessionStore {
    config: Arc<SessionConfig>,
    sessions: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config: Arc::new(config),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<Uuid, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_expired(&self, entry: &SessionEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.last_seen) > self.config.ttl
    }

    /// Resolve the session for `id`, starting a new one if `id` is absent,
    /// unknown or expired. A new session is not registered until
    /// [`persist`](Self::persist) is called for it.
    pub fn load_or_create(&self, id: Option<Uuid>) -> LoadedSession {
        let now = Instant::now();
        let mut sessions = self.entries();

        if let Some(id) = id {
            let live = sessions
                .get_mut(&id)
                .filter(|entry| !self.is_expired(entry, now));
            if let Some(entry) = live {
                entry.last_seen = now;
                return LoadedSession {
                    id,
                    handle: entry.session.clone(),
                    created: false,
                };
            }

            if sessions.remove(&id).is_some() {
                tracing::debug!(session = %id, "session expired");
            } else {
                tracing::debug!(session = %id, "unknown session id");
            }
        }

        LoadedSession {
            id: Uuid::new_v4(),
            handle: SessionHandle::default(),
            created: true,
        }
    }

    /// Register a newly created session if it now holds any state.
    ///
    /// Returns whether the session is registered, i.e. whether the client
    /// needs its id. Sessions that were already registered return `true`.
    pub fn persist(&self, loaded: &LoadedSession) -> bool {
        if !loaded.created {
            return true;
        }
        if loaded.handle.with(|session| session.is_blank()) {
            return false;
        }

        self.entries().insert(
            loaded.id,
            SessionEntry {
                session: loaded.handle.clone(),
                last_seen: Instant::now(),
            },
        );
        tracing::debug!(session = %loaded.id, "session started");
        true
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Drop every expired session. Returns how many were removed.
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.entries();
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, now));
        before - sessions.len()
    }

    /// Run [`cleanup`](Self::cleanup) every `period` until the runtime shuts
    /// down.
    pub fn spawn_cleanup(&self, period: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let removed = store.cleanup();
                if removed > 0 {
                    tracing::info!("Purged {} expired sessions", removed);
                }
            }
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
