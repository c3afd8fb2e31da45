//! HTTP transport module
//!
//! Provides the transport used by the continuation loop.
//!
//! # Features
//!
//! - **Transport seam**: one call, one parsed JSON response
//! - **Parameter flattening**: multi-value parameters are pipe-joined
//! - **Rate Limiting**: token bucket limiter using governor, shared per client

mod client;
mod rate_limit;

pub use client::{
    HttpTransport, HttpTransportConfig, HttpTransportConfigBuilder, RateLimited, Transport,
    DEFAULT_ENDPOINT,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig, DEFAULT_REQUESTS_PER_SECOND};
