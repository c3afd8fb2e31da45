//! Continuation module
//!
//! The wiki API splits large results across requests. Each response may
//! carry a `continue` object whose entries go into the next request; the
//! query is complete when a response arrives without one.
//!
//! # Overview
//!
//! - `ContinuationLoop` - drives one query, merging every page into one tree
//! - `LoopConfig` - optional request cap and overall deadline
//! - `QueryOutput` - merged result, collected warnings, request count

mod engine;
mod types;

pub use engine::{fetch_until_complete, ContinuationLoop};
pub use types::{LoopConfig, QueryOutput};
