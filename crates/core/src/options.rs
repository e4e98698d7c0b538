//! Interaction option store.
//!
//! An open, schema-less bag of scalar options attached to one interaction.
//! Storage enforces no shape; validators interpret keys (`max_chars`,
//! `rows`, ...) at the point of use. Reads of undeclared keys return
//! `None`, never an error, and writes merge per key rather than replacing
//! the bag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A scalar option value.
///
/// Values round-trip through the JSON column without coercion: numbers
/// stay numbers, booleans stay booleans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// String value.
    String(String),
}

impl OptionValue {
    /// The integer value, if this is an integer.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean value, if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The string value, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Option bag for one interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionOptions(BTreeMap<String, OptionValue>);

impl InteractionOptions {
    /// Create an empty bag.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Read one option. Absent is a normal state, distinct from a stored
    /// zero or `false`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    /// Read one option as an integer. `None` when the key is absent or
    /// holds a non-integer value.
    #[must_use]
    pub fn integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(OptionValue::as_integer)
    }

    /// Set one option, keeping all other keys.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Merge another bag into this one, key by key. Keys not present in
    /// `other` are left untouched; a merge never drops the bag.
    pub fn merge(&mut self, other: Self) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    /// Whether the bag holds no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of options in the bag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Decode a bag from the entity's JSON column.
    ///
    /// Tolerant by design: a non-object value yields an empty bag and
    /// non-scalar entries are skipped, so a read can never fail.
    #[must_use]
    pub fn from_json(value: &JsonValue) -> Self {
        let mut bag = Self::new();
        if let JsonValue::Object(map) = value {
            for (key, entry) in map {
                let parsed = match entry {
                    JsonValue::Bool(b) => Some(OptionValue::Bool(*b)),
                    JsonValue::Number(n) => n.as_i64().map(OptionValue::Integer).or_else(|| {
                        n.as_f64().map(OptionValue::Float)
                    }),
                    JsonValue::String(s) => Some(OptionValue::String(s.clone())),
                    _ => None,
                };
                if let Some(value) = parsed {
                    bag.0.insert(key.clone(), value);
                }
            }
        }
        bag
    }

    /// Encode the bag for the entity's JSON column.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let map = self
            .0
            .iter()
            .map(|(key, value)| {
                let json = match value {
                    OptionValue::Bool(b) => JsonValue::Bool(*b),
                    OptionValue::Integer(n) => JsonValue::from(*n),
                    OptionValue::Float(f) => JsonValue::from(*f),
                    OptionValue::String(s) => JsonValue::String(s.clone()),
                };
                (key.clone(), json)
            })
            .collect();
        JsonValue::Object(map)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_absent_is_none() {
        let bag = InteractionOptions::new();
        assert!(bag.get("max_chars").is_none());
        assert!(bag.integer("max_chars").is_none());
    }

    #[test]
    fn test_absent_is_distinct_from_zero() {
        let mut bag = InteractionOptions::new();
        bag.set("max_chars", 0i64);
        assert_eq!(bag.integer("max_chars"), Some(0));
        assert!(bag.get("rows").is_none());
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut bag = InteractionOptions::new();
        bag.set("rows", 10i64);
        bag.set("max_chars", 250i64);
        bag.set("placeholder", "Tell us more");
        bag.set("hint", "Optional".to_string());
        bag.set("required", true);
        bag.set("ratio", 0.5);

        assert_eq!(bag.integer("rows"), Some(10));
        assert_eq!(bag.integer("max_chars"), Some(250));
        assert_eq!(
            bag.get("placeholder").and_then(OptionValue::as_str),
            Some("Tell us more")
        );
        assert_eq!(bag.get("hint").and_then(OptionValue::as_str), Some("Optional"));
        assert_eq!(bag.get("required").and_then(OptionValue::as_bool), Some(true));
        assert_eq!(bag.get("ratio"), Some(&OptionValue::Float(0.5)));
    }

    #[test]
    fn test_json_round_trip_preserves_value_identity() {
        let json = json!({"rows": 10, "max_chars": 250, "hint": "short", "flag": false, "ratio": 0.5});
        let bag = InteractionOptions::from_json(&json);

        assert_eq!(bag.get("rows"), Some(&OptionValue::Integer(10)));
        assert_eq!(bag.get("max_chars"), Some(&OptionValue::Integer(250)));
        assert_eq!(bag.get("flag"), Some(&OptionValue::Bool(false)));
        assert_eq!(bag.get("ratio"), Some(&OptionValue::Float(0.5)));

        assert_eq!(bag.to_json(), json);
    }

    #[test]
    fn test_merge_preserves_untouched_keys() {
        let mut bag = InteractionOptions::from_json(&json!({"rows": 10, "max_chars": 250}));

        let mut update = InteractionOptions::new();
        update.set("max_chars", 500i64);
        bag.merge(update);

        assert_eq!(bag.integer("rows"), Some(10));
        assert_eq!(bag.integer("max_chars"), Some(500));
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn test_from_json_tolerates_non_object() {
        assert!(InteractionOptions::from_json(&JsonValue::Null).is_empty());
        assert!(InteractionOptions::from_json(&json!([1, 2])).is_empty());
    }

    #[test]
    fn test_from_json_skips_nested_values() {
        let bag = InteractionOptions::from_json(&json!({"rows": 10, "nested": {"a": 1}}));
        assert_eq!(bag.integer("rows"), Some(10));
        assert!(bag.get("nested").is_none());
    }
}
