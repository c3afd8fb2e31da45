//! Transport to the wiki API
//!
//! Provides:
//! - the [`Transport`] seam the continuation loop calls once per page
//! - a reqwest-backed [`HttpTransport`] issuing one GET per call
//! - the [`RateLimited`] decorator that gates any transport on a shared limiter

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{Error, Result};
use crate::types::{JsonValue, RequestParams};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Issues a single API call and returns the parsed JSON body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request with the given parameters
    async fn get(&self, params: &RequestParams) -> Result<JsonValue>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, params: &RequestParams) -> Result<JsonValue> {
        (**self).get(params).await
    }
}

#[async_trait]
impl<'a, T: Transport + ?Sized> Transport for &'a T {
    async fn get(&self, params: &RequestParams) -> Result<JsonValue> {
        (**self).get(params).await
    }
}

// ============================================================================
// HTTP Transport
// ============================================================================

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// API endpoint all requests go to
    pub endpoint: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("wikiquery/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpTransportConfig {
    /// Create a new config builder
    pub fn builder() -> HttpTransportConfigBuilder {
        HttpTransportConfigBuilder::default()
    }
}

/// Builder for HTTP transport config
#[derive(Default)]
pub struct HttpTransportConfigBuilder {
    config: HttpTransportConfig,
}

impl HttpTransportConfigBuilder {
    /// Set the endpoint
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpTransportConfig {
        self.config
    }
}

/// Plain HTTP transport, no rate limiting
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    config: HttpTransportConfig,
}

impl HttpTransport {
    /// Create a transport with the given configuration
    pub fn new(config: HttpTransportConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// The endpoint requests are sent to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, params: &RequestParams) -> Result<JsonValue> {
        let mut req = self
            .client
            .get(self.endpoint.clone())
            .query(&params.to_query_pairs());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body = response.text().await?;
        debug!(
            "GET {} ({} params) -> {} bytes",
            self.endpoint,
            params.len(),
            body.len()
        );
        Ok(serde_json::from_str(&body)?)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Rate Limited Decorator
// ============================================================================

/// Wraps a transport so every call first waits on a shared rate limiter
#[derive(Debug, Clone)]
pub struct RateLimited<T> {
    inner: T,
    limiter: RateLimiter,
}

impl<T: Transport> RateLimited<T> {
    /// Wrap `inner`, admitting calls through `limiter`
    pub fn new(inner: T, limiter: RateLimiter) -> Self {
        Self { inner, limiter }
    }

    /// Wrap `inner` with a fresh limiter built from `config`
    pub fn with_config(inner: T, config: &RateLimiterConfig) -> Self {
        Self::new(inner, RateLimiter::new(config))
    }

    /// The shared limiter
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// The wrapped transport
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Transport> Transport for RateLimited<T> {
    async fn get(&self, params: &RequestParams) -> Result<JsonValue> {
        self.limiter.wait().await;
        self.inner.get(params).await
    }
}
