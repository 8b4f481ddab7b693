//! The Value container.
//!
//! A [`Value`] is a tagged wrapper around an arbitrary result: a present
//! payload, an absent one, or an application error. Request parsing hands
//! these out everywhere so that callers can defer the "was it there, and
//! was it the right shape?" questions to the point of use, and the
//! rendering pipeline accepts them as content.
//!
//! A [`Map`] is the keyed collection of values used for query strings,
//! route parameters, and decoded request bodies.

use crate::error::{AppError, Error};
use std::collections::BTreeMap;

/// A tagged wrapper around an arbitrary result.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value present.
    Empty,
    /// A present payload.
    Json(serde_json::Value),
    /// An application error standing in for a value.
    Error(AppError),
}

impl Value {
    /// Wrap a payload.
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Value::Json(value.into())
    }

    /// The absent value.
    pub fn empty() -> Self {
        Value::Empty
    }

    /// Wrap an error.
    pub fn error(err: AppError) -> Self {
        Value::Error(err)
    }

    /// Whether a payload is present (absent and JSON `null` both count as
    /// unfilled; errors count as unfilled).
    pub fn filled(&self) -> bool {
        match self {
            Value::Json(value) => !value.is_null(),
            _ => false,
        }
    }

    /// Whether this value carries an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// The error, if this value carries one.
    pub fn error_value(&self) -> Option<&AppError> {
        match self {
            Value::Error(err) => Some(err),
            _ => None,
        }
    }

    /// The raw JSON payload, if present.
    pub fn json(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Descend into the payload by key.
    ///
    /// An empty key returns the value itself, so callers can treat "the
    /// whole body" and "one field of the body" uniformly. Arrays accept
    /// numeric keys. A missing key yields an error value, not a panic.
    pub fn get(&self, key: &str) -> Value {
        if key.is_empty() {
            return self.clone();
        }
        match self {
            Value::Json(serde_json::Value::Object(map)) => match map.get(key) {
                Some(found) => Value::Json(found.clone()),
                None => Value::error(AppError::new(format!("no value found by key: {}", key))),
            },
            Value::Json(serde_json::Value::Array(items)) => match key.parse::<usize>() {
                Ok(index) if index < items.len() => Value::Json(items[index].clone()),
                _ => Value::error(AppError::new(format!("no value found by key: {}", key))),
            },
            Value::Error(err) => Value::Error(err.clone()),
            _ => Value::error(AppError::new(format!("no value found by key: {}", key))),
        }
    }

    /// Extract the payload as a string, casting scalars.
    pub fn string(&self) -> Result<String, Error> {
        match self {
            Value::Json(serde_json::Value::String(s)) => Ok(s.clone()),
            Value::Json(serde_json::Value::Number(n)) => Ok(n.to_string()),
            Value::Json(serde_json::Value::Bool(b)) => Ok(b.to_string()),
            Value::Error(err) => Err(Error::Deserialization(err.message().to_string())),
            other => Err(Error::Deserialization(format!(
                "can not cast {} to string",
                other.type_name()
            ))),
        }
    }

    /// Extract the payload as an integer, parsing numeric strings.
    pub fn int(&self) -> Result<i64, Error> {
        match self {
            Value::Json(serde_json::Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| Error::Deserialization("number is not an integer".to_string())),
            Value::Json(serde_json::Value::String(s)) => s
                .parse()
                .map_err(|_| Error::Deserialization(format!("can not cast {:?} to integer", s))),
            Value::Error(err) => Err(Error::Deserialization(err.message().to_string())),
            other => Err(Error::Deserialization(format!(
                "can not cast {} to integer",
                other.type_name()
            ))),
        }
    }

    /// Extract the payload as a boolean, accepting `"true"`/`"false"` and
    /// `"1"`/`"0"` strings.
    pub fn boolean(&self) -> Result<bool, Error> {
        match self {
            Value::Json(serde_json::Value::Bool(b)) => Ok(*b),
            Value::Json(serde_json::Value::String(s)) => match s.as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(Error::Deserialization(format!(
                    "can not cast {:?} to boolean",
                    s
                ))),
            },
            Value::Error(err) => Err(Error::Deserialization(err.message().to_string())),
            other => Err(Error::Deserialization(format!(
                "can not cast {} to boolean",
                other.type_name()
            ))),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Empty => "Empty",
            Value::Json(serde_json::Value::Null) => "Null",
            Value::Json(serde_json::Value::Bool(_)) => "Bool",
            Value::Json(serde_json::Value::Number(_)) => "Number",
            Value::Json(serde_json::Value::String(_)) => "String",
            Value::Json(serde_json::Value::Array(_)) => "Array",
            Value::Json(serde_json::Value::Object(_)) => "Object",
            Value::Error(_) => "Error",
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Json(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Json(serde_json::Value::String(value.to_string()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Json(serde_json::Value::String(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Json(serde_json::Value::Number(value.into()))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Json(serde_json::Value::Bool(value))
    }
}

impl From<AppError> for Value {
    fn from(err: AppError) -> Self {
        Value::Error(err)
    }
}

/// A keyed collection of values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    entries: BTreeMap<String, Value>,
}

impl Map {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from string pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.insert(key, value);
        }
        map
    }

    /// Parse a URL query string. Percent-encoding is decoded; a key without
    /// `=` maps to the empty string; the last duplicate wins.
    pub fn from_query(query: &str) -> Self {
        let mut map = Self::new();
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = urlencoding::decode(raw_key)
                .map(|k| k.into_owned())
                .unwrap_or_else(|_| raw_key.to_string());
            let value = urlencoding::decode(raw_value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| raw_value.to_string());
            map.insert(key, value);
        }
        map
    }

    /// Insert a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look a value up; a missing key yields an error value.
    pub fn get(&self, key: &str) -> Value {
        match self.entries.get(key) {
            Some(value) => value.clone(),
            None => Value::error(AppError::new(format!("no value found by key: {}", key))),
        }
    }

    /// Whether the key is present.
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Merge `other` into this map; entries of `other` win.
    pub fn merge(mut self, other: Map) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_and_empty() {
        assert!(Value::new("x").filled());
        assert!(!Value::empty().filled());
        assert!(!Value::Json(serde_json::Value::Null).filled());
        assert!(!Value::error(AppError::new("gone")).filled());
    }

    #[test]
    fn typed_extraction() {
        assert_eq!(Value::from("42").int().unwrap(), 42);
        assert_eq!(Value::from(42i64).string().unwrap(), "42");
        assert!(Value::from("1").boolean().unwrap());
        assert!(Value::empty().string().is_err());
    }

    #[test]
    fn get_descends_into_objects_and_arrays() {
        let value = Value::new(serde_json::json!({"user": {"id": 7}, "tags": ["a", "b"]}));
        assert_eq!(value.get("user").get("id").int().unwrap(), 7);
        assert_eq!(value.get("tags").get("1").string().unwrap(), "b");
        assert!(value.get("missing").is_error());
    }

    #[test]
    fn empty_key_returns_whole_value() {
        let value = Value::new(serde_json::json!({"a": 1}));
        assert_eq!(value.get(""), value);
    }

    #[test]
    fn query_parsing_decodes_and_overwrites() {
        let map = Map::from_query("name=Jo%20Ann&flag&name2=x&name2=y");
        assert_eq!(map.get("name").string().unwrap(), "Jo Ann");
        assert_eq!(map.get("flag").string().unwrap(), "");
        assert_eq!(map.get("name2").string().unwrap(), "y");
        assert!(map.get("absent").is_error());
    }

    #[test]
    fn merge_prefers_other() {
        let base = Map::from_pairs([("a", "1"), ("b", "2")]);
        let over = Map::from_pairs([("b", "3")]);
        let merged = base.merge(over);
        assert_eq!(merged.get("a").string().unwrap(), "1");
        assert_eq!(merged.get("b").string().unwrap(), "3");
    }
}
