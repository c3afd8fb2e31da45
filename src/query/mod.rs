//! Typed query operations
//!
//! [`WikiClient`] ties the pieces together: an option struct builds the
//! request parameters, the continuation loop fetches every page, and the
//! merged result is projected down to the part the caller asked for.
//!
//! One client owns one rate limiter. Clone-free concurrent use is fine:
//! every method takes `&self`, and each call runs its own loop with its own
//! parameters and accumulator.

mod operations;

use crate::cancel::CancellationToken;
use crate::config::ClientConfig;
use crate::continuation::{ContinuationLoop, LoopConfig, QueryOutput};
use crate::error::{Error, Result};
use crate::http::{HttpTransport, RateLimited, RateLimiter, Transport};
use crate::params::ParamBuilder;
use crate::types::{JsonObject, JsonValue, RequestParams};
use tracing::debug;

/// Client for the wiki API
#[derive(Debug)]
pub struct WikiClient<T = RateLimited<HttpTransport>> {
    transport: T,
    loop_config: LoopConfig,
}

impl WikiClient {
    /// Client for the default endpoint at the default rate
    pub fn new() -> Result<Self> {
        Self::from_config(&ClientConfig::default())
    }

    /// Client built from a [`ClientConfig`]
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.transport_config())?;
        let limiter = RateLimiter::new(&config.rate_limit_config());
        Ok(Self::with_transport(RateLimited::new(transport, limiter))
            .with_loop_config(config.loop_config()))
    }

    /// The limiter shared by every query on this client
    pub fn limiter(&self) -> &RateLimiter {
        self.transport.limiter()
    }
}

impl<T: Transport> WikiClient<T> {
    /// Client over any transport
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            loop_config: LoopConfig::default(),
        }
    }

    /// Set the limits applied to every query
    #[must_use]
    pub fn with_loop_config(mut self, config: LoopConfig) -> Self {
        self.loop_config = config;
        self
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Loop limits applied to every query
    pub fn loop_config(&self) -> &LoopConfig {
        &self.loop_config
    }

    /// Run raw parameters to completion, advancing `params` in place
    pub async fn fetch_until_complete(&self, params: &mut RequestParams) -> Result<QueryOutput> {
        ContinuationLoop::new(&self.transport)
            .with_config(self.loop_config.clone())
            .run(params)
            .await
    }

    /// Like [`fetch_until_complete`](Self::fetch_until_complete), abandoned when `token` is cancelled
    pub async fn fetch_with_cancel(
        &self,
        params: &mut RequestParams,
        token: CancellationToken,
    ) -> Result<QueryOutput> {
        ContinuationLoop::new(&self.transport)
            .with_config(self.loop_config.clone())
            .with_cancellation(token)
            .run(params)
            .await
    }

    /// Build, fetch and project one query
    pub async fn run<B: ParamBuilder + ?Sized>(
        &self,
        builder: &B,
        path: &[&str],
    ) -> Result<JsonValue> {
        let mut params = builder.build()?;
        let output = self.fetch_until_complete(&mut params).await?;
        debug!(
            "Projecting '{}' after {} request(s)",
            path.join("."),
            output.requests
        );
        project(output.result, path)
    }
}

/// Take the value at `path` out of `value`
pub fn project(mut value: JsonValue, path: &[&str]) -> Result<JsonValue> {
    let mut cursor = &mut value;
    for key in path {
        cursor = cursor
            .get_mut(*key)
            .ok_or_else(|| Error::missing_path(path.join(".")))?;
    }
    Ok(cursor.take())
}

fn into_object(value: JsonValue, path: &[&str]) -> Result<JsonObject> {
    match value {
        JsonValue::Object(map) => Ok(map),
        other => Err(Error::decode(format!(
            "expected an object at '{}', got {other}",
            path.join(".")
        ))),
    }
}

fn into_array(value: JsonValue, path: &[&str]) -> Result<Vec<JsonValue>> {
    match value {
        JsonValue::Array(items) => Ok(items),
        other => Err(Error::decode(format!(
            "expected an array at '{}', got {other}",
            path.join(".")
        ))),
    }
}
