//! Query parameters
//!
//! Values are bound by name and sent alongside the query text, never spliced
//! into it. The one exception the store protocol needs, a wildcard search
//! term, is built by [`SearchPattern`] and is still passed as a parameter.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// A single parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    StrArray(Vec<String>),
}

impl ParamValue {
    /// The JSON representation used on the wire and by the in-memory evaluator
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Null => Value::Null,
            ParamValue::Bool(b) => Value::Bool(*b),
            ParamValue::Int(i) => Value::from(*i),
            ParamValue::Float(f) => Value::from(*f),
            ParamValue::Str(s) => Value::String(s.clone()),
            ParamValue::StrArray(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<usize> for ParamValue {
    fn from(i: usize) -> Self {
        ParamValue::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<f64> for ParamValue {
    fn from(f: f64) -> Self {
        ParamValue::Float(f)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::StrArray(items)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ParamValue::Null)
    }
}

/// Named parameters for one query execution
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value to `$name`, replacing any previous binding
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .iter()
            .map(|(name, value)| format!("${}={}", name, value.to_json()))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

/// A case-insensitive "contains" pattern for the store's `match` operator
///
/// User-supplied wildcards are stripped and whitespace is collapsed, then the
/// term is wrapped as `*term*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern(String);

impl SearchPattern {
    /// Build a pattern, or `None` when nothing searchable remains
    pub fn contains(term: &str) -> Option<Self> {
        let cleaned: Vec<&str> = term
            .split(|c: char| c.is_whitespace() || c == '*')
            .filter(|s| !s.is_empty())
            .collect();

        if cleaned.is_empty() {
            return None;
        }

        Some(Self(format!("*{}*", cleaned.join(" "))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<SearchPattern> for ParamValue {
    fn from(p: SearchPattern) -> Self {
        ParamValue::Str(p.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_get() {
        let params = Params::new()
            .bind("slug", "jane-doe")
            .bind("limit", 10usize)
            .bind("featured", true)
            .bind("status", None::<String>);

        assert_eq!(params.len(), 4);
        assert_eq!(params.get("slug"), Some(&ParamValue::Str("jane-doe".into())));
        assert_eq!(params.get("limit"), Some(&ParamValue::Int(10)));
        assert_eq!(params.get("status"), Some(&ParamValue::Null));
        assert!(params.get("missing").is_none());
    }

    #[test]
    fn test_rebinding_replaces_value() {
        let params = Params::new().bind("slug", "a").bind("slug", "b");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("slug"), Some(&ParamValue::Str("b".into())));
    }

    #[test]
    fn test_serializes_as_json_object() {
        let params = Params::new()
            .bind("tags", vec!["print".to_string(), "video".to_string()])
            .bind("year", 2021i64);

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({"tags": ["print", "video"], "year": 2021}));
    }

    #[test]
    fn test_search_pattern_wraps_and_cleans() {
        let pattern = SearchPattern::contains("  schork ").unwrap();
        assert_eq!(pattern.as_str(), "*schork*");

        let pattern = SearchPattern::contains("*atelier**  schork*").unwrap();
        assert_eq!(pattern.as_str(), "*atelier schork*");
    }

    #[test]
    fn test_search_pattern_empty() {
        assert!(SearchPattern::contains("").is_none());
        assert!(SearchPattern::contains(" ** ").is_none());
    }

    #[test]
    fn test_display() {
        let params = Params::new().bind("slug", "x");
        assert_eq!(params.to_string(), "{$slug=\"x\"}");
    }
}
