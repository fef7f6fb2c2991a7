//! Insecure Authentication and Authorisation backends to allow all access.
//!
//! These backends are intended for early development cycles or demo instances.
use anyhow::Result;

use panelcore_auth::access::AccessPolicy;
use panelcore_auth::identity::Authentication;
use panelcore_auth::identity::IdentityReader;
use panelcore_auth::Principal;
use panelcore_auth::ResourceAccess;
use panelcore_context::Context;

/// Unconditionally handle all requests as unauthenticated.
pub struct Anonymous;

#[async_trait::async_trait(?Send)]
impl Authentication for Anonymous {
    async fn authenticate(&self, _: &Context, _: &dyn IdentityReader) -> Result<Option<Principal>> {
        Ok(None)
    }
}

/// Authorise unrestricted access for all requests, authenticated or not.
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn evaluate(&self, _: Option<&Principal>, _: &ResourceAccess) -> bool {
        true
    }
}
