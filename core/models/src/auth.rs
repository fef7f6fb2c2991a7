//! Models for Authentication (who is asking) and Authorisation (what they can do).
use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

/// The authenticated actor performing a request.
///
/// Principals are resolved by an authentication backend once per request and
/// are immutable for the duration of that request.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    /// Identifier of the platform user acting as a panel administrator.
    pub user: String,

    /// Grant unconditional access to every panel resource.
    ///
    /// This preserves the platform's original "admin flag" model, with the
    /// granular permission system layered on top of it.
    #[serde(default)]
    pub super_admin: bool,

    /// Set of permission keys granted to the principal.
    #[serde(default)]
    pub permissions: HashSet<String>,
}

impl Principal {
    /// Check if a permission key is part of the principal's granted set.
    pub fn grants(&self, key: &str) -> bool {
        self.permissions.contains(key)
    }
}

/// Access declaration for a protected panel resource.
///
/// Every protected resource declares its guard explicitly at registration
/// time: a resource kind plus at most one permission key.
/// A resource with no permission key is implicitly super-admin only.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResourceAccess {
    /// Kind of the protected resource (for example `users` or `posts`).
    pub kind: String,

    /// Permission key guarding the resource, if one is declared.
    #[serde(default)]
    pub permission_key: Option<String>,
}

impl ResourceAccess {
    /// Declare a protected resource with no permission key (super-admin only).
    pub fn new<S: Into<String>>(kind: S) -> Self {
        Self {
            kind: kind.into(),
            permission_key: None,
        }
    }

    /// Attach the permission key guarding the resource.
    pub fn with_permission<S: Into<String>>(mut self, key: S) -> Self {
        self.permission_key = Some(key.into());
        self
    }
}
