//
//  octorest
//  api/snapshot.rs
//

//! Null-Tolerant JSON Decoding Helpers
//!
//! Most of this crate decodes responses straight into serde models.
//! [`Snapshot`] is the caller-facing companion to the raw-JSON read path
//! ([`GitHubClient::get_json`](crate::api::GitHubClient::get_json)): it gives
//! field-by-field access over a generic `serde_json::Value` with one rule —
//! once the top level has parsed, *field absence is never an error*. Scalar
//! accessors take a default, object and array accessors return `None`/empty.
//!
//! # Example
//!
//! ```rust
//! use octorest::api::Snapshot;
//!
//! let snap = Snapshot::parse(r#"{"id": 42, "name": "runner-1", "busy": true, "labels": []}"#).unwrap();
//! assert_eq!(snap.long("id", 0), 42);
//! assert_eq!(snap.string("name"), Some("runner-1"));
//! assert!(snap.boolean("busy"));
//! assert!(snap.array("labels").is_empty());
//! assert_eq!(snap.long("missing", -1), -1);
//! ```
//!
//! # Notes
//!
//! - A `Snapshot` is an immutable value; accessors never mutate it
//! - Wrong-typed fields behave exactly like absent fields (default applies)
//! - Malformed top-level JSON fails fast in [`Snapshot::parse`]

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::common::ApiError;

/// An immutable, null-tolerant view over a parsed JSON object.
///
/// Constructed from a raw response string with [`Snapshot::parse`] or from an
/// already-parsed [`Value`] with [`Snapshot::new`]. All accessors are total:
/// they return the supplied default (or `None`/empty) when the key is absent
/// or holds a value of the wrong type.
#[derive(Debug, Clone)]
pub struct Snapshot {
    value: Value,
}

impl Snapshot {
    /// Wraps an already-parsed JSON value.
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Parses a raw JSON string into a snapshot.
    ///
    /// This is the only place a malformed payload errors; every accessor
    /// after this point is total.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when the string is not valid JSON.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        Ok(Self {
            value: serde_json::from_str(raw)?,
        })
    }

    /// Returns the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Consumes the snapshot, returning the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Returns the string value at `key`, or `None` when absent.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(Value::as_str)
    }

    /// Returns the string value at `key`, or `default` when absent.
    pub fn string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.string(key).unwrap_or(default)
    }

    /// Returns the integer value at `key`, or `default` when absent or not
    /// an integer.
    pub fn long(&self, key: &str, default: i64) -> i64 {
        self.value
            .get(key)
            .and_then(Value::as_i64)
            .unwrap_or(default)
    }

    /// Returns the integer value at `key` narrowed to `i32`, or `default`
    /// when absent, not an integer, or out of range.
    pub fn int(&self, key: &str, default: i32) -> i32 {
        self.value
            .get(key)
            .and_then(Value::as_i64)
            .and_then(|v| i32::try_from(v).ok())
            .unwrap_or(default)
    }

    /// Returns the floating-point value at `key`, or `default` when absent.
    pub fn double(&self, key: &str, default: f64) -> f64 {
        self.value
            .get(key)
            .and_then(Value::as_f64)
            .unwrap_or(default)
    }

    /// Returns the boolean value at `key`, or `false` when absent.
    pub fn boolean(&self, key: &str) -> bool {
        self.value
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Returns the nested object at `key` as a child snapshot.
    ///
    /// `None` when the key is absent or not an object, enabling the usual
    /// `if let Some(child) = snap.object("owner")` pattern before nested
    /// construction. Nested children recurse with the same tolerance.
    pub fn object(&self, key: &str) -> Option<Snapshot> {
        match self.value.get(key) {
            Some(v) if v.is_object() => Some(Snapshot::new(v.clone())),
            _ => None,
        }
    }

    /// Returns the array at `key` decomposed element-by-element.
    ///
    /// Source order is preserved. An absent key (or a non-array value)
    /// yields an empty vector, never an error.
    pub fn array(&self, key: &str) -> Vec<Snapshot> {
        match self.value.get(key).and_then(Value::as_array) {
            Some(items) => items.iter().cloned().map(Snapshot::new).collect(),
            None => Vec::new(),
        }
    }

    /// Returns the array of strings at `key`.
    ///
    /// Non-string elements are skipped; an absent key yields an empty
    /// vector.
    pub fn string_array(&self, key: &str) -> Vec<String> {
        match self.value.get(key).and_then(Value::as_array) {
            Some(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Parses the ISO 8601 timestamp string at `key`.
    ///
    /// `None` when the key is absent or the value does not parse as an
    /// RFC 3339 timestamp.
    pub fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.string(key)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Decodes the whole snapshot into a typed model.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when a required field is missing or an
    /// enum value falls outside its known set.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_value(self.value.clone())?)
    }
}

/// Coerces an external string onto a closed enum.
///
/// Lookup is serde-based, so wire aliases declared with `#[serde(rename)]`
/// (notably `"+1"` / `"-1"` on
/// [`ReactionContent`](crate::api::common::ReactionContent)) resolve before
/// strict matching. Anything unresolvable raises
/// [`ApiError::UnknownEnumValue`] — an unknown member of a closed set means
/// the API contract changed, and silently defaulting would hide that.
///
/// # Example
///
/// ```rust
/// use octorest::api::common::ReactionContent;
/// use octorest::api::snapshot::parse_enum;
///
/// assert_eq!(parse_enum::<ReactionContent>("+1").unwrap(), ReactionContent::PlusOne);
/// assert!(parse_enum::<ReactionContent>("bogus").is_err());
/// ```
pub fn parse_enum<E: DeserializeOwned>(raw: &str) -> Result<E, ApiError> {
    serde_json::from_value(Value::String(raw.to_string()))
        .map_err(|_| ApiError::UnknownEnumValue(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ReactionContent;

    fn runner_snapshot() -> Snapshot {
        Snapshot::parse(r#"{"id": 42, "name": "runner-1", "busy": true, "labels": []}"#).unwrap()
    }

    #[test]
    fn test_scalar_accessors() {
        let snap = runner_snapshot();
        assert_eq!(snap.long("id", 0), 42);
        assert_eq!(snap.int("id", 0), 42);
        assert_eq!(snap.string("name"), Some("runner-1"));
        assert!(snap.boolean("busy"));
        assert!(snap.array("labels").is_empty());
    }

    #[test]
    fn test_missing_keys_yield_defaults_not_errors() {
        let snap = runner_snapshot();
        assert_eq!(snap.string("missing"), None);
        assert_eq!(snap.string_or("missing", ""), "");
        assert_eq!(snap.long("missing", -7), -7);
        assert_eq!(snap.double("missing", 1.5), 1.5);
        assert!(!snap.boolean("missing"));
        assert!(snap.object("missing").is_none());
        assert!(snap.array("missing").is_empty());
        assert!(snap.string_array("missing").is_empty());
        assert!(snap.timestamp("missing").is_none());
    }

    #[test]
    fn test_wrong_typed_field_behaves_like_absent() {
        let snap = Snapshot::parse(r#"{"id": "not-a-number", "busy": "yes"}"#).unwrap();
        assert_eq!(snap.long("id", 99), 99);
        assert!(!snap.boolean("busy"));
    }

    #[test]
    fn test_nested_object_and_array_decomposition() {
        let snap = Snapshot::parse(
            r#"{
                "owner": {"login": "octocat", "plan": {"name": "pro"}},
                "assets": [{"name": "a.tar.gz"}, {"name": "b.zip"}]
            }"#,
        )
        .unwrap();

        let owner = snap.object("owner").unwrap();
        assert_eq!(owner.string("login"), Some("octocat"));
        // Recursion stays null-tolerant.
        assert_eq!(owner.object("plan").unwrap().string("name"), Some("pro"));
        assert!(owner.object("company").is_none());

        let assets = snap.array("assets");
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].string("name"), Some("a.tar.gz"));
        assert_eq!(assets[1].string("name"), Some("b.zip"));
    }

    #[test]
    fn test_timestamp_parsing() {
        let snap = Snapshot::parse(r#"{"created_at": "2020-01-22T19:33:08Z"}"#).unwrap();
        let ts = snap.timestamp("created_at").unwrap();
        assert_eq!(ts.to_rfc3339(), "2020-01-22T19:33:08+00:00");
    }

    #[test]
    fn test_parse_fails_fast_on_malformed_json() {
        assert!(matches!(
            Snapshot::parse("{not json"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_enum_aliases_and_rejection() {
        assert_eq!(
            parse_enum::<ReactionContent>("+1").unwrap(),
            ReactionContent::PlusOne
        );
        assert_eq!(
            parse_enum::<ReactionContent>("-1").unwrap(),
            ReactionContent::MinusOne
        );
        assert_eq!(
            parse_enum::<ReactionContent>("heart").unwrap(),
            ReactionContent::Heart
        );
        assert!(matches!(
            parse_enum::<ReactionContent>("bogus"),
            Err(ApiError::UnknownEnumValue(v)) if v == "bogus"
        ));
    }
}
