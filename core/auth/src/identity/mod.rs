//! Module to deal with the Authentication (who is accessing) side of Auth.
use std::sync::Arc;

use anyhow::Result;

use panelcore_context::Context;

use crate::Principal;

/// Operations implemented by Authentication mechanisms supported by Panelcore.
#[async_trait::async_trait(?Send)]
pub trait Authentication: Send + Sync {
    /// Determine the [`Principal`] performing a request and verify their identity is valid.
    ///
    /// [`Authentication`] implementations must respect the following expectations:
    ///
    /// - Determine the identity of the [`Principal`] attached to a request.
    /// - Ensure the identity information can be trusted and has not been tempered with.
    /// - If identity information is not part of the request return `None`.
    /// - If identity information is part of the request but not valid return an appropriate error.
    async fn authenticate(
        &self,
        context: &Context,
        transport: &dyn IdentityReader,
    ) -> Result<Option<Principal>>;
}

/// Determine the [`Principal`] requesting actions in a trusted way.
#[derive(Clone)]
pub struct Authenticator {
    /// Authentication backend to determine the [`Principal`] with.
    inner: Arc<dyn Authentication>,
}

impl Authenticator {
    /// Determine the [`Principal`] performing a request and verify their identity is valid.
    ///
    /// For details see [`Authentication::authenticate`].
    pub async fn authenticate(
        &self,
        context: &Context,
        transport: &dyn IdentityReader,
    ) -> Result<Option<Principal>> {
        self.inner.authenticate(context, transport).await
    }
}

impl<T> From<T> for Authenticator
where
    T: Authentication + 'static,
{
    fn from(value: T) -> Self {
        let inner = Arc::new(value);
        Authenticator { inner }
    }
}

/// Read identity information to discover and verify [`Principal`]s from a variety of sources.
pub trait IdentityReader {
    /// Look for a metadata value with the given key.
    ///
    /// Returns `None` if the entry is missing or an `Err` if the metadata could
    /// not be read or decoded.
    ///
    /// For example in HTTP(S) requests metadata should be extracted from headers.
    fn metadata(&self, name: &str) -> Result<Option<&str>>;
}

#[cfg(feature = "actix-web")]
impl IdentityReader for actix_web::HttpRequest {
    fn metadata(&self, name: &str) -> Result<Option<&str>> {
        match self.headers().get(name) {
            None => Ok(None),
            Some(header) => {
                let value = header.to_str()?;
                Ok(Some(value))
            }
        }
    }
}
