//! Modern API client for the HTTP(S) protocol.
use anyhow::Result;
use reqwest::Client as ReqwestClient;

use panelcore_bridge::HttpMethod;
use panelcore_bridge::ModernApi;
use panelcore_bridge::ModernRequest;
use panelcore_bridge::ModernResponse;
use panelcore_context::Context;

/// String to set as the user agent in HTTP requests.
static CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Modern API client for the HTTP(S) protocol.
pub struct HttpModern {
    /// Base URL of the API server to send requests to.
    base: String,

    /// Low-level [`Client`](reqwest::Client) to perform HTTP requests with.
    client: ReqwestClient,
}

impl HttpModern {
    /// Initialise a client sending requests to the given base address.
    pub fn new<S: Into<String>>(base: S) -> Result<HttpModern> {
        let base = base.into();
        let base = base.trim_end_matches('/').to_string();
        let client = ReqwestClient::builder()
            .user_agent(CLIENT_USER_AGENT)
            .build()?;
        Ok(HttpModern { base, client })
    }
}

#[async_trait::async_trait]
impl ModernApi for HttpModern {
    async fn forward(&self, _: &Context, request: ModernRequest) -> Result<ModernResponse> {
        let method = match request.method {
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        };
        let url = format!("{}{}", self.base, request.path);
        let response = self
            .client
            .request(method, url)
            .bearer_auth(&request.bearer)
            .json(&request.body)
            .send()
            .await?;

        // Preserve the response exactly: the bridge passes it through to
        // legacy callers without reinterpretation.
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) => serde_json::Value::String(text),
        };
        Ok(ModernResponse { body, status })
    }
}
