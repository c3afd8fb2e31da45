//! Client configuration
//!
//! A `ClientConfig` can be built in code or loaded from YAML. Every field has
//! a default, so an empty document is a valid config:
//!
//! ```yaml
//! endpoint: https://de.wikipedia.org/w/api.php
//! requests_per_second: 50
//! timeout_secs: 10
//! query_timeout_secs: 120
//! max_requests: 500
//! headers:
//!   Api-User-Agent: research-bot/1.0 (ops@example.org)
//! ```

use crate::continuation::LoopConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::{
    HttpTransportConfig, RateLimiterConfig, DEFAULT_ENDPOINT, DEFAULT_REQUESTS_PER_SECOND,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Client Config
// ============================================================================

/// Settings for a [`WikiClient`](crate::query::WikiClient)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API endpoint (`.../w/api.php`)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Ceiling on outbound requests, shared by all queries on the client
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Token bucket size; 1 keeps requests evenly spaced
    #[serde(default = "default_burst_size")]
    pub burst_size: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Deadline for a whole continued query, in seconds
    #[serde(default)]
    pub query_timeout_secs: Option<u64>,

    /// Cap on requests per query (unbounded when unset)
    #[serde(default)]
    pub max_requests: Option<u32>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra headers on every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_requests_per_second() -> u32 {
    DEFAULT_REQUESTS_PER_SECOND
}

fn default_burst_size() -> u32 {
    1
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            requests_per_second: default_requests_per_second(),
            burst_size: default_burst_size(),
            timeout_secs: default_timeout_secs(),
            query_timeout_secs: None,
            max_requests: None,
            user_agent: None,
            headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Check values that would otherwise fail later or silently misbehave
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.endpoint)
            .map_err(|e| Error::config(format!("invalid endpoint '{}': {e}", self.endpoint)))?;
        if self.requests_per_second == 0 {
            return Err(Error::config("requests_per_second must be at least 1"));
        }
        if self.burst_size == 0 {
            return Err(Error::config("burst_size must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be at least 1"));
        }
        if self.max_requests == Some(0) {
            return Err(Error::config("max_requests must be at least 1"));
        }
        Ok(())
    }

    /// Transport settings
    pub fn transport_config(&self) -> HttpTransportConfig {
        let mut builder = HttpTransportConfig::builder()
            .endpoint(&self.endpoint)
            .timeout(Duration::from_secs(self.timeout_secs));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }

    /// Rate limiter settings
    pub fn rate_limit_config(&self) -> RateLimiterConfig {
        RateLimiterConfig::new(self.requests_per_second, self.burst_size)
    }

    /// Continuation loop limits
    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            max_requests: self.max_requests,
            query_timeout: self.query_timeout_secs.map(Duration::from_secs),
        }
    }
}
