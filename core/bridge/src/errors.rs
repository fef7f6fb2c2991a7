//! Errors returned to legacy API integrators.
use serde_json::Value as Json;

/// A legacy API call rejected before it was forwarded.
///
/// Error identifiers and texts are a public contract with legacy
/// integrators: they must never be renumbered or reworded.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BridgeError {
    /// The session hash does not resolve to a valid session.
    ///
    /// Transient session store faults map here too: from the caller's point
    /// of view they are indistinguishable from an unknown hash.
    #[error("Invalid hash - Session not found")]
    InvalidCredential,

    /// The call carried no session hash.
    #[error("Hash is required")]
    MissingCredential,

    /// The call is missing a parameter its sub-action requires.
    #[error("{text}")]
    MissingParameter {
        /// Pair-specific error identifier.
        error_id: u32,
        /// Pair-specific error text.
        text: &'static str,
    },

    /// The (feature, sub-action) pair is not mapped onto the modern API.
    #[error("Bad request, feature not supported or not specified.")]
    UnsupportedOperation,
}

impl BridgeError {
    /// HTTP status the error envelope is sent with.
    pub fn api_status(&self) -> u16 {
        400
    }

    /// Stable numeric identifier of the error.
    pub fn error_id(&self) -> u32 {
        match self {
            BridgeError::InvalidCredential => 2,
            BridgeError::MissingCredential => 1,
            BridgeError::MissingParameter { error_id, .. } => *error_id,
            BridgeError::UnsupportedOperation => 1,
        }
    }

    /// Render the legacy JSON error envelope for this error.
    pub fn envelope(&self) -> Json {
        serde_json::json!({
            "api_status": self.api_status(),
            "api_text": "failed",
            "errors": {
                "error_id": self.error_id(),
                "error_text": self.to_string(),
            },
        })
    }
}
