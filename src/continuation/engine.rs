//! Continuation loop
//!
//! Drives one logical query to completion: request, merge, check for a
//! server error, surface warnings, and advance the cursor while the server
//! keeps returning a `continue` token.

use super::types::{LoopConfig, QueryOutput};
use crate::cancel::CancellationToken;
use crate::error::{Error, Result};
use crate::http::Transport;
use crate::merge::merge;
use crate::types::{JsonObject, JsonValue, RequestParams};
use tracing::{debug, warn};

/// Envelope keys the loop acts on, lifted out of a fragment before merging
#[derive(Debug, Default)]
struct Envelope {
    error: Option<JsonValue>,
    warnings: Option<JsonValue>,
    continuation: Option<JsonValue>,
}

impl Envelope {
    fn lift(fragment: &JsonValue) -> Self {
        Self {
            error: fragment.get("error").cloned(),
            warnings: fragment.get("warnings").cloned(),
            continuation: fragment.get("continue").cloned(),
        }
    }
}

enum Step {
    Requesting,
    Merging(JsonValue),
    CheckingError(Envelope),
    CheckingWarnings(Envelope),
    CheckingContinuation(Option<JsonValue>),
    Done,
    Failed(Error),
}

/// Runs continued queries against a transport
pub struct ContinuationLoop<'a, T: Transport + ?Sized> {
    transport: &'a T,
    config: LoopConfig,
    cancel: Option<CancellationToken>,
}

impl<'a, T: Transport + ?Sized> ContinuationLoop<'a, T> {
    /// Create a loop over `transport` with no limits
    pub fn new(transport: &'a T) -> Self {
        Self {
            transport,
            config: LoopConfig::default(),
            cancel: None,
        }
    }

    /// Set loop limits
    #[must_use]
    pub fn with_config(mut self, config: LoopConfig) -> Self {
        self.config = config;
        self
    }

    /// Abandon the query when `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Run until the server stops returning a `continue` token.
    ///
    /// `params` is advanced in place with each continuation token. On a
    /// server-reported error the partially merged result is discarded.
    pub async fn run(&self, params: &mut RequestParams) -> Result<QueryOutput> {
        match self.config.query_timeout {
            Some(limit) => tokio::time::timeout(limit, self.drive(params))
                .await
                .map_err(|_| Error::Timeout {
                    timeout_ms: limit.as_millis() as u64,
                })?,
            None => self.drive(params).await,
        }
    }

    async fn drive(&self, params: &mut RequestParams) -> Result<QueryOutput> {
        let mut accumulated = JsonValue::Object(JsonObject::new());
        let mut warnings = Vec::new();
        let mut requests: u32 = 0;
        let mut step = Step::Requesting;

        loop {
            step = match step {
                Step::Requesting => match self.request(params).await {
                    Ok(fragment) => {
                        requests += 1;
                        Step::Merging(fragment)
                    }
                    Err(e) => Step::Failed(e),
                },
                Step::Merging(fragment) => {
                    let envelope = Envelope::lift(&fragment);
                    merge(&mut accumulated, fragment);
                    Step::CheckingError(envelope)
                }
                Step::CheckingError(mut envelope) => match envelope.error.take() {
                    Some(error) => Step::Failed(Error::wiki(error)),
                    None => Step::CheckingWarnings(envelope),
                },
                Step::CheckingWarnings(envelope) => {
                    if let Some(warning) = envelope.warnings {
                        warn!("Wiki API warning: {warning}");
                        warnings.push(warning);
                    }
                    Step::CheckingContinuation(envelope.continuation)
                }
                Step::CheckingContinuation(None) => Step::Done,
                Step::CheckingContinuation(Some(JsonValue::Object(token))) => {
                    match self.config.max_requests {
                        Some(max_requests) if requests >= max_requests => {
                            Step::Failed(Error::MaxRequestsExceeded { max_requests })
                        }
                        _ => {
                            debug!("Continuing after request {requests} with {token:?}");
                            params.apply_continuation(&token);
                            Step::Requesting
                        }
                    }
                }
                Step::CheckingContinuation(Some(other)) => Step::Failed(Error::decode(format!(
                    "'continue' must be an object, got {other}"
                ))),
                Step::Done => {
                    debug!("Query complete after {requests} request(s)");
                    return Ok(QueryOutput {
                        result: accumulated,
                        warnings,
                        requests,
                    });
                }
                Step::Failed(e) => return Err(e),
            };
        }
    }

    async fn request(&self, params: &RequestParams) -> Result<JsonValue> {
        let Some(token) = &self.cancel else {
            return self.transport.get(params).await;
        };

        if token.is_cancelled() {
            return Err(Error::Cancelled);
        }

        tokio::select! {
            biased;
            () = token.cancelled() => Err(Error::Cancelled),
            result = self.transport.get(params) => result,
        }
    }
}

/// Run `params` to completion over `transport` with no limits
pub async fn fetch_until_complete<T: Transport + ?Sized>(
    transport: &T,
    params: &mut RequestParams,
) -> Result<QueryOutput> {
    ContinuationLoop::new(transport).run(params).await
}
