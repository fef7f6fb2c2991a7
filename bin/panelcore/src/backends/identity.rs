//! Authentication backend resolving identities from platform sessions.
use std::collections::HashMap;

use anyhow::Result;

use panelcore_auth::identity::Authentication;
use panelcore_auth::identity::IdentityReader;
use panelcore_auth::Principal;
use panelcore_context::Context;
use panelcore_sessions::SessionLookup;
use panelcore_sessions::Sessions;

/// Name of the HTTP header carrying the caller's bearer credential.
const AUTHORIZATION_HEADER: &str = "authorization";

/// Prefix of bearer credentials in the authorization header.
const BEARER_PREFIX: &str = "Bearer ";

/// Authenticate requests by resolving their bearer session hash.
///
/// The session store maps the hash to a platform user; the user is then
/// matched against the administrators declared in the configuration to
/// materialise a [`Principal`] with their granted permissions.
/// Platform users with a valid session but no admin grants stay anonymous.
pub struct SessionIdentity {
    /// Configured administrators, indexed by platform user id.
    admins: HashMap<String, Principal>,

    /// Interface to the platform session store.
    sessions: Sessions,
}

impl SessionIdentity {
    /// Initialise the backend from the configured admin grants.
    pub fn new(admins: &[Principal], sessions: Sessions) -> SessionIdentity {
        let admins = admins
            .iter()
            .map(|admin| (admin.user.clone(), admin.clone()))
            .collect();
        SessionIdentity { admins, sessions }
    }
}

#[async_trait::async_trait(?Send)]
impl Authentication for SessionIdentity {
    async fn authenticate(
        &self,
        context: &Context,
        transport: &dyn IdentityReader,
    ) -> Result<Option<Principal>> {
        // Requests without a bearer credential are anonymous, not invalid.
        let header = match transport.metadata(AUTHORIZATION_HEADER)? {
            Some(header) => header,
            None => return Ok(None),
        };
        let hash = match header.strip_prefix(BEARER_PREFIX) {
            Some(hash) if !hash.is_empty() => hash,
            _ => return Ok(None),
        };

        let user = match self.sessions.lookup(context, hash).await? {
            SessionLookup::Found(user) => user,
            SessionLookup::NotFound => return Ok(None),
        };
        Ok(self.admins.get(&user).cloned())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use panelcore_auth::identity::Authentication;
    use panelcore_auth::identity::IdentityReader;
    use panelcore_auth::Principal;
    use panelcore_context::Context;
    use panelcore_sessions::Sessions;
    use panelcore_sessions::SessionsFixture;

    use super::SessionIdentity;

    struct Headers(Option<&'static str>);

    impl IdentityReader for Headers {
        fn metadata(&self, _: &str) -> Result<Option<&str>> {
            Ok(self.0)
        }
    }

    fn fixture() -> (SessionIdentity, SessionsFixture) {
        let sessions = SessionsFixture::new();
        let admins = vec![Principal {
            user: "7".to_string(),
            super_admin: false,
            permissions: ["manage-users".to_string()].into_iter().collect(),
        }];
        let identity = SessionIdentity::new(&admins, Sessions::from(sessions.backend()));
        (identity, sessions)
    }

    #[tokio::test]
    async fn no_credential_is_anonymous() {
        let (identity, _) = fixture();
        let context = Context::fixture();
        let principal = identity
            .authenticate(&context, &Headers(None))
            .await
            .unwrap();
        assert_eq!(principal, None);
    }

    #[tokio::test]
    async fn malformed_credential_is_anonymous() {
        let (identity, _) = fixture();
        let context = Context::fixture();
        let principal = identity
            .authenticate(&context, &Headers(Some("Basic dXNlcg==")))
            .await
            .unwrap();
        assert_eq!(principal, None);
    }

    #[tokio::test]
    async fn unknown_session_is_anonymous() {
        let (identity, _) = fixture();
        let context = Context::fixture();
        let principal = identity
            .authenticate(&context, &Headers(Some("Bearer nope")))
            .await
            .unwrap();
        assert_eq!(principal, None);
    }

    #[tokio::test]
    async fn session_without_grants_is_anonymous() {
        let (identity, sessions) = fixture();
        sessions.session("xyz789", "23");
        let context = Context::fixture();
        let principal = identity
            .authenticate(&context, &Headers(Some("Bearer xyz789")))
            .await
            .unwrap();
        assert_eq!(principal, None);
    }

    #[tokio::test]
    async fn admin_session_resolves_principal() {
        let (identity, sessions) = fixture();
        sessions.session("abc123", "7");
        let context = Context::fixture();
        let principal = identity
            .authenticate(&context, &Headers(Some("Bearer abc123")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(principal.user, "7");
        assert!(principal.grants("manage-users"));
    }

    #[tokio::test]
    async fn store_fault_is_an_error() {
        let (identity, sessions) = fixture();
        sessions.session("abc123", "7");
        sessions.fail_next();
        let context = Context::fixture();
        let result = identity
            .authenticate(&context, &Headers(Some("Bearer abc123")))
            .await;
        assert!(result.is_err());
    }
}
