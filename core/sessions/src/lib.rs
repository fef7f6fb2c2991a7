//! Session store interface for the Panelcore back-office.
//!
//! Sessions map opaque session hashes (the bearer tokens issued by the
//! platform at login) to platform user identifiers.
//! The store is owned by the wider platform: Panelcore only ever reads it.
//!
//! Lookup outcomes are explicit: a hash either resolves to a user or it does
//! not, and transient store faults are reported as errors instead of being
//! conflated with "not found" through exception control flow.
//! Callers decide how to fold the variants together.
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value as Json;

use panelcore_context::Context;

#[cfg(any(test, feature = "test-fixture"))]
mod fixture;
#[cfg(any(test, feature = "test-fixture"))]
pub use self::fixture::SessionsFixture;
#[cfg(any(test, feature = "test-fixture"))]
pub use self::fixture::SessionsFixtureBackend;


/// Outcome of a session hash lookup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionLookup {
    /// The hash maps to a valid session for the given platform user.
    Found(String),

    /// The hash does not map to any valid session.
    NotFound,
}

/// Resolve session hashes against the platform's session store.
#[derive(Clone)]
pub struct Sessions {
    /// Runtime configured implementation of the session store.
    inner: Arc<dyn SessionStore>,
}

impl Sessions {
    /// Resolve a session hash to the platform user it belongs to.
    pub async fn lookup(&self, context: &Context, hash: &str) -> Result<SessionLookup> {
        self.inner.lookup(context, hash).await
    }
}

impl<T> From<T> for Sessions
where
    T: SessionStore + 'static,
{
    fn from(value: T) -> Self {
        Sessions {
            inner: Arc::new(value),
        }
    }
}

#[cfg(any(test, feature = "test-fixture"))]
impl Sessions {
    /// Initialise an empty session store fixture for unit tests.
    pub fn fixture() -> Self {
        Self::from(SessionsFixture::new().backend())
    }
}

/// Operations implemented by session stores supported by Panelcore.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolve a session hash to the platform user it belongs to.
    ///
    /// Returns an `Err` only for store faults (connectivity, decoding).
    /// A hash with no matching session is [`SessionLookup::NotFound`].
    async fn lookup(&self, context: &Context, hash: &str) -> Result<SessionLookup>;
}

/// Initialisation logic for the session store and the client to access it.
#[async_trait::async_trait]
pub trait SessionStoreFactory: std::fmt::Debug + Send + Sync {
    /// Validate the user provided configuration for the backend.
    fn conf_check(&self, context: &Context, conf: &Json) -> Result<()>;

    /// Register backend specific metrics.
    fn register_metrics(&self, registry: &prometheus::Registry) -> Result<()>;

    /// Instantiate a [`Sessions`] object to resolve session hashes.
    async fn session_store<'a>(&self, args: SessionStoreFactoryArgs<'a>) -> Result<Sessions>;
}

/// Arguments passed to the [`SessionStoreFactory`] client initialisation method.
pub struct SessionStoreFactoryArgs<'a> {
    /// The configuration block for the backend to initialise.
    pub conf: &'a Json,

    /// Container for operation scoped values.
    pub context: &'a Context,
}
