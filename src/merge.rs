//! Deep merge of response fragments
//!
//! Each page of a continued query returns a fragment shaped like the full
//! response. Fragments are folded into one accumulated tree:
//!
//! - object into object: missing keys are inserted, shared keys recurse
//! - array into array: elements are appended in order
//! - any other pairing: the accumulated value is kept, the fragment dropped
//!
//! The last rule loses data when the two sides disagree on shape. Endpoints
//! return a uniform schema across pages, so this is accepted rather than
//! resolved here.

use crate::types::JsonValue;
use tracing::trace;

/// Merge `fragment` into `accumulated` in place.
pub fn merge(accumulated: &mut JsonValue, fragment: JsonValue) {
    match (accumulated, fragment) {
        (JsonValue::Object(acc), JsonValue::Object(more)) => {
            for (key, value) in more {
                match acc.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        acc.insert(key, value);
                    }
                }
            }
        }
        (JsonValue::Array(acc), JsonValue::Array(more)) => {
            acc.extend(more);
        }
        (acc, dropped) => {
            trace!(
                "Merge keeps existing {} value, dropping {} fragment",
                shape(acc),
                shape(&dropped)
            );
        }
    }
}

fn shape(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Object(_) => "object",
        JsonValue::Array(_) => "array",
        _ => "scalar",
    }
}
