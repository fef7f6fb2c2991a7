//! Session store backend for unit tests.
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::Result;

use panelcore_context::Context;

use super::SessionLookup;
use super::SessionStore;

/// Introspection tools for session lookups performed during unit tests.
#[derive(Clone, Default)]
pub struct SessionsFixture {
    fail_next: Arc<AtomicBool>,
    sessions: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionsFixture {
    /// Create a backend that will resolve hashes against this fixture.
    pub fn backend(&self) -> SessionsFixtureBackend {
        SessionsFixtureBackend {
            fail_next: Arc::clone(&self.fail_next),
            sessions: Arc::clone(&self.sessions),
        }
    }

    /// Make the next lookup fail with a simulated transient store fault.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Initialise a session store fixture for unit tests.
    pub fn new() -> SessionsFixture {
        SessionsFixture::default()
    }

    /// Record a valid session mapping a hash to a platform user.
    pub fn session<S1, S2>(&self, hash: S1, user: S2)
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        self.sessions
            .lock()
            .expect("SessionsFixture sessions lock poisoned")
            .insert(hash.into(), user.into());
    }
}

/// Session store backend for unit tests.
pub struct SessionsFixtureBackend {
    fail_next: Arc<AtomicBool>,
    sessions: Arc<Mutex<HashMap<String, String>>>,
}

#[async_trait::async_trait]
impl SessionStore for SessionsFixtureBackend {
    async fn lookup(&self, _: &Context, hash: &str) -> Result<SessionLookup> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            anyhow::bail!("simulated transient session store fault");
        }
        let sessions = self
            .sessions
            .lock()
            .expect("SessionsFixture sessions lock poisoned");
        let lookup = match sessions.get(hash) {
            Some(user) => SessionLookup::Found(user.clone()),
            None => SessionLookup::NotFound,
        };
        Ok(lookup)
    }
}
