//! Interface implemented by legacy endpoints mapped onto the modern API.
use super::LegacyRequest;
use super::ModernRequest;

/// Operations implemented by legacy endpoints supported by the bridge.
///
/// An endpoint owns the translation of one legacy (feature, sub-action) pair:
/// it declares the parameters the pair requires and builds the normalised
/// modern request once the bridge has validated the call and resolved the
/// caller's session.
pub trait LegacyEndpoint: Send + Sync {
    /// Parameters the legacy call must carry, with their rejection envelopes.
    fn required(&self) -> &'static [RequiredParam] {
        &[]
    }

    /// Build the normalised modern API request for a validated legacy call.
    fn request(&self, call: ForwardArgs<'_>) -> ModernRequest;
}

/// Arguments passed to [`LegacyEndpoint::request`].
pub struct ForwardArgs<'a> {
    /// The validated legacy call being translated.
    pub request: &'a LegacyRequest,

    /// The caller's resolved session.
    pub session: &'a ResolvedSession,
}

/// A legacy parameter an endpoint cannot operate without.
///
/// The error identifier and text are pair-specific and part of the public
/// legacy error contract.
pub struct RequiredParam {
    /// Name of the legacy parameter.
    pub name: &'static str,

    /// Error identifier sent when the parameter is absent.
    pub error_id: u32,

    /// Error text sent when the parameter is absent.
    pub error_text: &'static str,
}

/// A session hash resolved to the platform user it belongs to.
#[derive(Clone, Debug)]
pub struct ResolvedSession {
    /// The opaque session hash, forwarded as the bearer credential.
    ///
    /// The modern API re-resolves the hash itself so the bridge never mints
    /// credentials of its own.
    pub hash: String,

    /// Identifier of the platform user the session belongs to.
    pub user: String,
}
