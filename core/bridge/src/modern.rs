//! Interfaces to forward normalised requests to the modern API.
use std::sync::Arc;

use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as Json;

use panelcore_context::Context;

/// HTTP methods used by normalised modern API requests.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum HttpMethod {
    Delete,
    Get,
    Post,
    Put,
}

/// A normalised request targeting a modern API route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModernRequest {
    /// Opaque bearer credential identifying the caller.
    pub bearer: String,

    /// JSON body carrying the action specific parameters.
    pub body: Json,

    /// HTTP method of the modern route.
    pub method: HttpMethod,

    /// Path of the modern route, relative to the API server base address.
    pub path: String,
}

/// The response returned by a modern API route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModernResponse {
    /// JSON body of the response.
    pub body: Json,

    /// HTTP status code of the response.
    pub status: u16,
}

/// Forward normalised requests to the backing modern API.
#[derive(Clone)]
pub struct Modern {
    /// Runtime configured implementation of the modern API client.
    inner: Arc<dyn ModernApi>,
}

impl Modern {
    /// Forward a normalised request and return the modern API response.
    pub async fn forward(&self, context: &Context, request: ModernRequest) -> Result<ModernResponse> {
        self.inner.forward(context, request).await
    }
}

impl<T> From<T> for Modern
where
    T: ModernApi + 'static,
{
    fn from(value: T) -> Self {
        Modern {
            inner: Arc::new(value),
        }
    }
}

#[cfg(any(test, feature = "test-fixture"))]
impl Modern {
    /// Initialise a modern API fixture backend for unit tests.
    pub fn fixture() -> Self {
        Self::from(ModernFixture::new().backend())
    }
}

/// Operations implemented by modern API clients supported by Panelcore.
///
/// Forwarding is assumed idempotent-safe: implementations must not retry.
#[async_trait::async_trait]
pub trait ModernApi: Send + Sync {
    /// Forward a normalised request and return the modern API response.
    async fn forward(&self, context: &Context, request: ModernRequest) -> Result<ModernResponse>;
}

#[cfg(any(test, feature = "test-fixture"))]
pub use self::fixture::ModernFixture;

#[cfg(any(test, feature = "test-fixture"))]
mod fixture {
    use std::sync::atomic::AtomicBool;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::sync::Mutex;

    use anyhow::Result;

    use panelcore_context::Context;

    use super::ModernApi;
    use super::ModernRequest;
    use super::ModernResponse;

    /// Introspection tools for requests forwarded during unit tests.
    #[derive(Clone)]
    pub struct ModernFixture {
        fail_next: Arc<AtomicBool>,
        requests: Arc<Mutex<Vec<ModernRequest>>>,
        response: Arc<Mutex<ModernResponse>>,
    }

    impl ModernFixture {
        /// Create a backend that will record requests onto this fixture.
        pub fn backend(&self) -> ModernFixtureBackend {
            ModernFixtureBackend {
                fail_next: Arc::clone(&self.fail_next),
                requests: Arc::clone(&self.requests),
                response: Arc::clone(&self.response),
            }
        }

        /// Make the next forward fail with a simulated transport fault.
        pub fn fail_next(&self) {
            self.fail_next.store(true, Ordering::SeqCst);
        }

        /// Initialise a modern API fixture for unit tests.
        pub fn new() -> ModernFixture {
            let response = ModernResponse {
                body: serde_json::json!({"api_status": 200}),
                status: 200,
            };
            ModernFixture {
                fail_next: Arc::new(AtomicBool::new(false)),
                requests: Arc::new(Mutex::new(Vec::new())),
                response: Arc::new(Mutex::new(response)),
            }
        }

        /// Fetch the requests forwarded to the fixture so far.
        pub fn requests(&self) -> Vec<ModernRequest> {
            self.requests
                .lock()
                .expect("ModernFixture requests lock poisoned")
                .clone()
        }

        /// Set the response returned for forwarded requests.
        pub fn respond_with(&self, response: ModernResponse) {
            let mut slot = self
                .response
                .lock()
                .expect("ModernFixture response lock poisoned");
            *slot = response;
        }
    }

    /// Modern API backend for unit tests.
    pub struct ModernFixtureBackend {
        fail_next: Arc<AtomicBool>,
        requests: Arc<Mutex<Vec<ModernRequest>>>,
        response: Arc<Mutex<ModernResponse>>,
    }

    #[async_trait::async_trait]
    impl ModernApi for ModernFixtureBackend {
        async fn forward(&self, _: &Context, request: ModernRequest) -> Result<ModernResponse> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                anyhow::bail!("simulated transport fault reaching the modern API");
            }
            self.requests
                .lock()
                .expect("ModernFixture requests lock poisoned")
                .push(request);
            let response = self
                .response
                .lock()
                .expect("ModernFixture response lock poisoned")
                .clone();
            Ok(response)
        }
    }
}
