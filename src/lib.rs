//! # wikiquery
//!
//! Async client for the MediaWiki action API that follows `continue` tokens
//! to the end and merges every page into one result.
//!
//! ## Features
//!
//! - **Continuation handling**: repeats a query until the server stops continuing
//! - **Result merging**: deep-merges page fragments (objects union, arrays append)
//! - **Server errors and warnings**: `error` fails the query, `warnings` are logged and collected
//! - **Rate limiting**: one governor token bucket shared by every query on a client
//! - **Typed operations**: validated option structs for each API module
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wikiquery::params::{CategoryMemberType, CategoryMembersOptions, Limit};
//! use wikiquery::{Result, WikiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = WikiClient::new()?;
//!
//!     let options = CategoryMembersOptions::title("Category:Algebra")
//!         .member_type(CategoryMemberType::Page)
//!         .limit(Limit::Count(50));
//!     let members = client.category_members(&options).await?;
//!
//!     for member in members {
//!         println!("{}", member["title"]);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  WikiClient::category_members / info / links / ...       │
//! │  options ─▶ ParamBuilder::build ─▶ RequestParams         │
//! └──────────────────────────────┬───────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────┐
//! │  ContinuationLoop                                        │
//! │  request ─▶ merge ─▶ error? ─▶ warnings ─▶ continue?     │
//! └──────────────┬───────────────────────────────┬───────────┘
//!                │                               │
//! ┌──────────────┴──────────────┐  ┌─────────────┴───────────┐
//! │ RateLimited<HttpTransport>  │  │ merge                   │
//! │ governor ─▶ reqwest GET     │  │ object ∪ / array ++     │
//! └─────────────────────────────┘  └─────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Deep merge of response fragments
pub mod merge;

/// HTTP transport and rate limiting
pub mod http;

/// Cooperative cancellation
pub mod cancel;

/// Continuation loop
pub mod continuation;

/// Per-module request parameter builders
pub mod params;

/// Typed query operations
pub mod query;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use cancel::CancellationToken;
pub use config::ClientConfig;
pub use continuation::{fetch_until_complete, ContinuationLoop, LoopConfig, QueryOutput};
pub use error::{Error, Result, WikiError};
pub use query::WikiClient;
pub use types::{JsonObject, JsonValue, ParamValue, RequestParams};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
