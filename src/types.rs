//! Common types used throughout wikiquery
//!
//! JSON aliases plus the request-parameter map that every query is built
//! from and that the continuation loop advances in place.

use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Parameter Values
// ============================================================================

/// A single request parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Plain string
    Text(String),
    /// Integer (page ids, limits, namespaces)
    Integer(i64),
    /// Multi-value parameter, sent pipe-joined
    List(Vec<String>),
}

impl ParamValue {
    /// Render the value the way it goes on the wire
    pub fn to_query_value(&self) -> String {
        match self {
            ParamValue::Text(s) => s.clone(),
            ParamValue::Integer(n) => n.to_string(),
            ParamValue::List(items) => items.join("|"),
        }
    }

    /// Convert a continuation token entry. `null` yields `None`.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => None,
            JsonValue::String(s) => Some(ParamValue::Text(s.clone())),
            JsonValue::Number(n) => Some(match n.as_i64() {
                Some(i) => ParamValue::Integer(i),
                None => ParamValue::Text(n.to_string()),
            }),
            JsonValue::Bool(b) => Some(ParamValue::Text(b.to_string())),
            JsonValue::Array(items) => Some(ParamValue::List(
                items
                    .iter()
                    .map(|item| match item {
                        JsonValue::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            )),
            JsonValue::Object(_) => Some(ParamValue::Text(value.to_string())),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_value())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => ParamValue::Integer(n),
            Err(_) => ParamValue::Text(value.to_string()),
        }
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<u64>> for ParamValue {
    fn from(value: Vec<u64>) -> Self {
        ParamValue::List(value.iter().map(ToString::to_string).collect())
    }
}

// ============================================================================
// Request Parameters
// ============================================================================

/// Insertion-ordered request parameters
///
/// Setting a key that already exists overwrites its value in place, keeping
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    entries: Vec<(String, ParamValue)>,
}

impl RequestParams {
    /// Create an empty parameter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, overwriting any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Set a parameter only when a value is present
    pub fn set_opt<V: Into<ParamValue>>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    /// Builder-style [`set`](Self::set)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Get a parameter
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Remove a parameter, returning its value
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Check whether a parameter is set
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no parameters are set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overwrite parameters with the entries of a continuation token.
    ///
    /// Plain key overwrite; a `null` entry removes the key.
    pub fn apply_continuation(&mut self, token: &JsonObject) {
        for (key, value) in token {
            match ParamValue::from_json(value) {
                Some(value) => self.set(key.as_str(), value),
                None => {
                    self.remove(key);
                }
            }
        }
    }

    /// Flatten into wire-ready key/value pairs
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_query_value()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RequestParams::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_param_value_wire_format() {
        assert_eq!(ParamValue::from("Algebra").to_query_value(), "Algebra");
        assert_eq!(ParamValue::from(42_u32).to_query_value(), "42");
        assert_eq!(
            ParamValue::from(vec!["Algebra".to_string(), "Geometry".to_string()])
                .to_query_value(),
            "Algebra|Geometry"
        );
        assert_eq!(ParamValue::from(vec![1_u64, 2, 3]).to_query_value(), "1|2|3");
    }

    #[test]
    fn test_large_u64_is_not_wrapped() {
        assert_eq!(ParamValue::from(42_u64), ParamValue::Integer(42));
        assert_eq!(
            ParamValue::from(u64::MAX),
            ParamValue::Text("18446744073709551615".to_string())
        );
        assert_eq!(
            ParamValue::from(u64::MAX).to_query_value(),
            u64::MAX.to_string()
        );
    }

    #[test]
    fn test_params_keep_insertion_order() {
        let params = RequestParams::new()
            .with("action", "query")
            .with("format", "json")
            .with("list", "categorymembers")
            .with("format", "xml");

        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["action", "format", "list"]);
        assert_eq!(params.get("format"), Some(&ParamValue::from("xml")));
    }

    #[test]
    fn test_set_opt_drops_none() {
        let mut params = RequestParams::new();
        params.set_opt("cmtitle", Some("Category:Algebra"));
        params.set_opt("cmpageid", None::<u64>);

        assert!(params.contains("cmtitle"));
        assert!(!params.contains("cmpageid"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_apply_continuation_overwrites_keys() {
        let mut params = RequestParams::new()
            .with("action", "query")
            .with("cmcontinue", "old");

        let token = json!({
            "cmcontinue": "page|414c47454252|12345",
            "continue": "-||",
            "offset": 50
        });
        params.apply_continuation(token.as_object().unwrap());

        assert_eq!(
            params.to_query_pairs(),
            vec![
                ("action".to_string(), "query".to_string()),
                ("cmcontinue".to_string(), "page|414c47454252|12345".to_string()),
                ("continue".to_string(), "-||".to_string()),
                ("offset".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn test_apply_continuation_null_removes_key() {
        let mut params = RequestParams::new().with("clcontinue", "x");
        params.apply_continuation(json!({"clcontinue": null}).as_object().unwrap());
        assert!(params.is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let params: RequestParams = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(params.len(), 2);
    }
}
