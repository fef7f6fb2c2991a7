//! Bridge from the legacy flat-parameter API to the modern versioned API.
//!
//! External integrators still call the platform's original API: a single
//! endpoint taking flat query or form parameters where `f` selects a feature,
//! `s` selects a sub-action within it and `hash` carries the caller's session
//! token.
//! The platform's internals have since moved to a versioned, resource
//! oriented API.
//!
//! The bridge keeps those integrations working without guessing:
//!
//! - Each legacy `(feature, sub-action)` pair is opt-in mapped to a
//!   [`LegacyEndpoint`] that builds the normalised modern request.
//! - Anything not explicitly mapped degrades to a uniform "not supported"
//!   error envelope.
//! - Session hashes are resolved before forwarding; a hash that cannot be
//!   resolved (including transient session store faults, which callers
//!   cannot distinguish from an unknown hash) is rejected with a stable
//!   error envelope.
//! - Successful responses from the modern API are returned verbatim, never
//!   reinterpreted or wrapped.
//!
//! Error identifiers and texts are a public contract with legacy integrators
//! and must never be renumbered; see [`BridgeError`].
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use panelcore_context::Context;
use panelcore_sessions::SessionLookup;
use panelcore_sessions::Sessions;

mod endpoint;
mod errors;
mod modern;

pub mod posts;

#[cfg(test)]
mod tests;

pub use self::endpoint::ForwardArgs;
pub use self::endpoint::LegacyEndpoint;
pub use self::endpoint::RequiredParam;
pub use self::endpoint::ResolvedSession;
pub use self::errors::BridgeError;
pub use self::modern::HttpMethod;
pub use self::modern::Modern;
pub use self::modern::ModernApi;
pub use self::modern::ModernRequest;
pub use self::modern::ModernResponse;

#[cfg(any(test, feature = "test-fixture"))]
pub use self::modern::ModernFixture;

/// Name of the legacy parameter selecting the feature.
pub const PARAM_FEATURE: &str = "f";

/// Name of the legacy parameter carrying the session hash.
pub const PARAM_HASH: &str = "hash";

/// Name of the legacy parameter selecting the sub-action within a feature.
pub const PARAM_SUB_ACTION: &str = "s";

/// An inbound legacy API call, decoded from its flat parameter encoding.
#[derive(Clone, Debug, Default)]
pub struct LegacyRequest {
    /// Requested feature (the legacy `f` parameter).
    pub feature: Option<String>,

    /// Requested sub-action within the feature (the legacy `s` parameter).
    pub sub_action: Option<String>,

    /// Session hash identifying the caller (the legacy `hash` parameter).
    pub hash: Option<String>,

    /// Remaining sub-action specific parameters.
    pub params: HashMap<String, String>,
}

impl LegacyRequest {
    /// Decode a legacy request from its flat parameter map.
    pub fn from_params(mut params: HashMap<String, String>) -> LegacyRequest {
        let feature = params.remove(PARAM_FEATURE);
        let sub_action = params.remove(PARAM_SUB_ACTION);
        let hash = params.remove(PARAM_HASH);
        LegacyRequest {
            feature,
            sub_action,
            hash,
            params,
        }
    }

    /// Fetch a sub-action specific parameter, with empty values treated as absent.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Outcome of handling a legacy API call.
#[derive(Clone, Debug, PartialEq)]
pub enum LegacyReply {
    /// The call was rejected before forwarding; send the error envelope.
    Error(BridgeError),

    /// The call was forwarded; send the modern API response verbatim.
    Forwarded(ModernResponse),
}

/// Translate legacy API calls and forward them to the modern API.
#[derive(Clone)]
pub struct Bridge {
    /// Registered legacy endpoints, keyed by (feature, sub-action).
    endpoints: HashMap<(String, String), Arc<dyn LegacyEndpoint>>,

    /// Interface to the modern API requests are forwarded to.
    modern: Modern,

    /// Interface to the platform session store.
    sessions: Sessions,
}

impl Bridge {
    /// Initialise a bridge with no registered endpoints.
    pub fn new(sessions: Sessions, modern: Modern) -> Bridge {
        Bridge {
            endpoints: HashMap::new(),
            modern,
            sessions,
        }
    }

    /// Initialise a bridge with all endpoints supported by Panelcore.
    pub fn with_default_endpoints(sessions: Sessions, modern: Modern) -> Bridge {
        Bridge::new(sessions, modern).register("posts", "delete_post", self::posts::DeletePost)
    }

    /// Register a legacy endpoint for a (feature, sub-action) pair.
    ///
    /// # Panics
    ///
    /// This method panics if the pair is already registered.
    pub fn register<E, S1, S2>(mut self, feature: S1, sub_action: S2, endpoint: E) -> Bridge
    where
        E: LegacyEndpoint + 'static,
        S1: Into<String>,
        S2: Into<String>,
    {
        let key = (feature.into(), sub_action.into());
        if self.endpoints.contains_key(&key) {
            panic!(
                "legacy endpoint already registered for feature '{}' sub-action '{}'",
                key.0, key.1,
            );
        }
        self.endpoints.insert(key, Arc::new(endpoint));
        self
    }

    /// Handle a legacy API call.
    ///
    /// All contractual rejections short-circuit into [`LegacyReply::Error`]
    /// with their fixed envelope.
    /// The only failure returned as `Err` is a fault while forwarding to the
    /// modern API, which is outside the legacy error contract and left for
    /// the HTTP host to report.
    pub async fn handle(&self, context: &Context, request: &LegacyRequest) -> Result<LegacyReply> {
        let endpoint = match self.lookup(request) {
            Some(endpoint) => endpoint,
            None => return Ok(LegacyReply::Error(BridgeError::UnsupportedOperation)),
        };

        // Validate the session hash and the endpoint's required parameters
        // before touching the session store.
        let hash = match request.hash.as_deref().filter(|hash| !hash.is_empty()) {
            Some(hash) => hash,
            None => return Ok(LegacyReply::Error(BridgeError::MissingCredential)),
        };
        for required in endpoint.required() {
            if request.param(required.name).is_none() {
                let error = BridgeError::MissingParameter {
                    error_id: required.error_id,
                    text: required.error_text,
                };
                return Ok(LegacyReply::Error(error));
            }
        }

        // Resolve the caller's identity from the session hash.
        // A transient store fault is observationally identical to an unknown
        // hash for the caller and maps to the same envelope.
        let session = match self.sessions.lookup(context, hash).await {
            Ok(SessionLookup::Found(user)) => ResolvedSession {
                hash: hash.to_string(),
                user,
            },
            Ok(SessionLookup::NotFound) => {
                return Ok(LegacyReply::Error(BridgeError::InvalidCredential));
            }
            Err(error) => {
                slog::warn!(
                    context.logger, "Session lookup failed during legacy API call";
                    "error" => %error,
                );
                return Ok(LegacyReply::Error(BridgeError::InvalidCredential));
            }
        };

        // Build the normalised modern request and forward it.
        let forward = endpoint.request(ForwardArgs {
            request,
            session: &session,
        });
        slog::debug!(
            context.logger, "Forwarding legacy API call to the modern API";
            "feature" => request.feature.as_deref().unwrap_or(""),
            "sub_action" => request.sub_action.as_deref().unwrap_or(""),
            "path" => &forward.path,
            "user" => &session.user,
        );
        let response = self.modern.forward(context, forward).await?;
        Ok(LegacyReply::Forwarded(response))
    }

    /// Lookup the endpoint registered for the request's (feature, sub-action) pair.
    fn lookup(&self, request: &LegacyRequest) -> Option<&Arc<dyn LegacyEndpoint>> {
        let feature = request.feature.clone()?;
        let sub_action = request.sub_action.clone()?;
        self.endpoints.get(&(feature, sub_action))
    }
}

#[cfg(any(test, feature = "test-fixture"))]
impl Bridge {
    /// Initialise a bridge over fixture backends for unit tests.
    pub fn fixture() -> Bridge {
        Bridge::with_default_endpoints(Sessions::fixture(), Modern::fixture())
    }
}
