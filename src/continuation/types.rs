//! Continuation loop types
//!
//! Configuration and output of a single logical query.

use crate::types::JsonValue;
use std::time::Duration;

/// Limits applied to one run of the continuation loop
///
/// The default trusts the server: no request cap and no overall deadline.
/// A server that never stops returning `continue` keeps the loop running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopConfig {
    /// Fail once this many requests were made and the server still continues
    pub max_requests: Option<u32>,
    /// Deadline for the whole query, across all pages
    pub query_timeout: Option<Duration>,
}

impl LoopConfig {
    /// Create an unbounded config
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of requests
    #[must_use]
    pub fn max_requests(mut self, max_requests: u32) -> Self {
        self.max_requests = Some(max_requests);
        self
    }

    /// Bound the whole query by a deadline
    #[must_use]
    pub fn query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }
}

/// Result of a completed query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutput {
    /// Deep merge of every response fragment, control keys included
    pub result: JsonValue,
    /// `warnings` values reported by the server, in arrival order
    pub warnings: Vec<JsonValue>,
    /// Number of requests issued
    pub requests: u32,
}

impl QueryOutput {
    /// Whether the server reported any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
