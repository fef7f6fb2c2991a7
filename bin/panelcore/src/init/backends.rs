//! Dependency backends configuration and initialisation logic.
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use panelcore_sessions::SessionStoreFactory;

/// Error looking for a specific backend implementation.
#[derive(Debug, thiserror::Error)]
pub enum BackendNotFound {
    /// Session store backend not recognised.
    #[error("session store backend '{0}' not recognised")]
    // (id,)
    Sessions(String),
}

impl BackendNotFound {
    /// Session store backend not recognised.
    pub fn sessions(id: &str) -> Self {
        Self::Sessions(id.to_string())
    }
}

/// Registers of backend factories for implementations supported by the process/build.
#[derive(Clone, Default)]
pub struct Backends {
    /// Supported Session Store backends.
    sessions: HashMap<String, Arc<dyn SessionStoreFactory>>,
}

impl Backends {
    /// Register a new factory for a Session Store implementation.
    ///
    /// # Panics
    ///
    /// This method panics if the identifier of the new Session Store backend is already in use.
    pub fn register_sessions<B, S>(&mut self, id: S, backend: B) -> &mut Self
    where
        B: SessionStoreFactory + 'static,
        S: Into<String>,
    {
        match self.sessions.entry(id.into()) {
            Entry::Occupied(entry) => {
                panic!(
                    "a SessionStore backend with id '{}' is already registered",
                    entry.key()
                )
            }
            Entry::Vacant(entry) => entry.insert(Arc::new(backend)),
        };
        self
    }

    /// Lookup a [`SessionStoreFactory`] by ID.
    pub fn sessions(&self, id: &str) -> Result<&dyn SessionStoreFactory> {
        let factory = self
            .sessions
            .get(id)
            .ok_or_else(|| BackendNotFound::sessions(id))?;
        Ok(factory.as_ref())
    }
}
