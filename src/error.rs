//! Error types for wikiquery
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::types::JsonValue;
use std::fmt;
use thiserror::Error;

/// Error object reported by the wiki API under the `error` key of a response.
///
/// The full payload is kept as-is; `code` and `info` are lifted out when the
/// server provides them as strings.
#[derive(Debug, Clone, PartialEq)]
pub struct WikiError {
    /// Machine-readable error code (e.g. `"missingtitle"`)
    pub code: Option<String>,
    /// Human-readable description
    pub info: Option<String>,
    /// The raw `error` value from the response
    pub payload: JsonValue,
}

impl WikiError {
    /// Build from the raw `error` value of a response fragment
    pub fn from_payload(payload: JsonValue) -> Self {
        let field = |key: &str| {
            payload
                .get(key)
                .and_then(JsonValue::as_str)
                .map(String::from)
        };
        Self {
            code: field("code"),
            info: field("info"),
            payload,
        }
    }
}

impl fmt::Display for WikiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.info) {
            (Some(code), Some(info)) => write!(f, "{code}: {info}"),
            (Some(code), None) => write!(f, "{code}"),
            (None, Some(info)) => write!(f, "{info}"),
            (None, None) => write!(f, "{}", self.payload),
        }
    }
}

impl std::error::Error for WikiError {}

/// The main error type for wikiquery
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Validation / Configuration Errors
    // ============================================================================
    #[error("Invalid query options: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Server-Reported Errors
    // ============================================================================
    #[error("Wiki API error: {0}")]
    Wiki(WikiError),

    #[error("Response has no value at '{path}'")]
    MissingPath { path: String },

    #[error("Malformed response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Loop Control
    // ============================================================================
    #[error("Query still continuing after {max_requests} requests")]
    MaxRequestsExceeded { max_requests: u32 },

    #[error("Query cancelled")]
    Cancelled,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a missing path error
    pub fn missing_path(path: impl Into<String>) -> Self {
        Self::MissingPath { path: path.into() }
    }

    /// Create a server-reported error from the raw `error` value
    pub fn wiki(payload: JsonValue) -> Self {
        Self::Wiki(WikiError::from_payload(payload))
    }

    /// The server-reported error, if this is one
    pub fn as_wiki(&self) -> Option<&WikiError> {
        match self {
            Error::Wiki(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the error happened before anything was sent
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Whether the error came from the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::HttpStatus { .. }
                | Error::JsonParse(_)
                | Error::Timeout { .. }
                | Error::InvalidUrl(_)
        )
    }
}

/// Result type alias for wikiquery
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
