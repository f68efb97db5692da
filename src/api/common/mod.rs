//
//  octorest
//  api/common/mod.rs
//

//! Common API Types
//!
//! This module provides the error taxonomy shared by every endpoint manager
//! plus a handful of models embedded across resource families (user
//! references, reaction rollups).
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`map_status`] - Converts a non-success HTTP response into an [`ApiError`]
//! - [`SimpleUser`] - Lightweight user reference embedded in many responses
//! - [`ReactionRollup`] / [`ReactionContent`] - Reaction counts and kinds
//!
//! # Example
//!
//! ```rust
//! use octorest::api::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::AuthRequired) => println!("Please authenticate first"),
//!         Err(ApiError::NotFound(resource)) => println!("Not found: {}", resource),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Notes
//!
//! - All types implement `Debug` for easy inspection
//! - Error messages are extracted from GitHub's error payload
//!   (`{"message": "...", "documentation_url": "...", "errors": [...]}`)
//!   whenever the body parses; otherwise the raw body is carried verbatim

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all GitHub API operations.
///
/// `ApiError` covers the common failure scenarios when talking to the GitHub
/// REST API. It implements the standard `Error` trait via `thiserror` for
/// ergonomic propagation with `?`.
///
/// # Variants
///
/// | Variant | Description | HTTP Status |
/// |---------|-------------|-------------|
/// | `AuthRequired` | No credentials were provided | 401 |
/// | `AuthFailed` | Invalid or expired credentials | 401 |
/// | `Forbidden` | Insufficient permissions | 403 |
/// | `NotFound` | Resource does not exist | 404 |
/// | `Validation` | Request rejected by server-side validation | 422 |
/// | `RateLimited` | Primary or secondary rate limit hit | 403/429 |
/// | `BadRequest` | Malformed request | 400 |
/// | `ServerError` | GitHub-side failure | 5xx |
/// | `Network` | Transport-level failure | N/A |
/// | `Decode` | Response body was not the expected JSON shape | N/A |
/// | `UnknownEnumValue` | A closed value set received an unknown member | N/A |
/// | `Unknown` | Unclassified error | N/A |
///
/// # Notes
///
/// - The `Network` variant converts automatically from `reqwest::Error`
/// - The `Decode` variant converts automatically from `serde_json::Error`;
///   it signals an API contract change (a required field or enum value the
///   library does not know about), not a user error
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication credentials are required but were not provided.
    #[error("Authentication required")]
    AuthRequired,

    /// Authentication failed due to invalid or expired credentials.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found (HTTP 404).
    ///
    /// GitHub also answers 404 for resources the token cannot see, so this
    /// can mask a permissions problem.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A primary or secondary rate limit has been exceeded.
    ///
    /// The message carries GitHub's explanation; check the
    /// `x-ratelimit-reset` response header for retry timing if needed.
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Access to the resource is forbidden (HTTP 403).
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// The request was malformed (HTTP 400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request was well-formed but rejected by validation (HTTP 422).
    ///
    /// Typical causes: a missing required field in a create/update payload,
    /// or an identifier that violates GitHub's naming rules.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An error occurred on GitHub's side (HTTP 5xx).
    ///
    /// These are typically transient and may succeed on retry; the library
    /// itself never retries.
    #[error("Server error: {0}")]
    ServerError(String),

    /// A transport-level error occurred (connection, TLS, timeout, DNS).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected JSON shape.
    ///
    /// Raised when a *required* field is absent or a closed enum receives a
    /// value outside its known set. Optional-field absence never produces
    /// this error.
    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// A string could not be coerced onto a closed enum.
    ///
    /// Indicates an API contract change (GitHub added a value the library
    /// does not know). There is deliberately no silent "unknown" fallback.
    #[error("Unknown enum value: {0}")]
    UnknownEnumValue(String),

    /// An unknown or unexpected error occurred.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Converts a non-success HTTP response into an [`ApiError`].
///
/// GitHub reports errors in a consistent envelope:
///
/// ```json
/// {"message": "Not Found", "documentation_url": "https://docs.github.com/..."}
/// ```
///
/// Validation failures (422) additionally carry an `errors` array whose
/// entries name the offending resource and field. This function extracts the
/// `message` (appending the first `errors` entry detail when present) and
/// selects the variant from the status code. If the body does not parse as
/// JSON, the raw body is carried verbatim.
///
/// # Parameters
///
/// * `status` - The HTTP status code of the failed response
/// * `body` - The raw response body
pub fn map_status(status: StatusCode, body: &str) -> ApiError {
    let message = extract_message(body)
        .unwrap_or_else(|| format!("API error ({}): {}", status, body.trim()));

    match status {
        StatusCode::UNAUTHORIZED => ApiError::AuthFailed(message),
        StatusCode::FORBIDDEN => {
            // Secondary rate limits come back as 403 with a telltale message.
            if message.to_ascii_lowercase().contains("rate limit") {
                ApiError::RateLimited(message)
            } else {
                ApiError::Forbidden(message)
            }
        }
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited(message),
        StatusCode::BAD_REQUEST => ApiError::BadRequest(message),
        StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation(message),
        s if s.is_server_error() => ApiError::ServerError(message),
        _ => ApiError::Unknown(message),
    }
}

/// Pulls a human-readable message out of a GitHub error payload.
///
/// Returns `None` when the body is not JSON or carries no `message` field.
fn extract_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = json.get("message")?.as_str()?.to_string();

    // 422 payloads name the offending field in an `errors` array.
    let detail = json
        .get("errors")
        .and_then(|e| e.as_array())
        .and_then(|arr| arr.first())
        .map(|err| {
            err.get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string())
        });

    Some(match detail {
        Some(detail) => format!("{} ({})", message, detail),
        None => message,
    })
}

/// Lightweight user reference embedded in many API responses.
///
/// GitHub embeds the same abbreviated user object inside releases, check
/// runs, webhooks and most other resources. Only the commonly useful fields
/// are modelled; the rest of the payload is ignored.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `id` | `u64` | Numeric account id |
/// | `login` | `String` | Account login name |
/// | `avatar_url` | `Option<String>` | Avatar image URL |
/// | `html_url` | `Option<String>` | Profile page URL |
/// | `user_type` | `Option<String>` | `"User"`, `"Organization"` or `"Bot"` |
/// | `site_admin` | `bool` | Whether the account is a site admin |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleUser {
    /// Numeric account id.
    pub id: u64,

    /// Account login name (e.g., `octocat`).
    pub login: String,

    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,

    /// Profile page URL.
    #[serde(default)]
    pub html_url: Option<String>,

    /// Account type reported by the API: `"User"`, `"Organization"` or `"Bot"`.
    #[serde(default, rename = "type")]
    pub user_type: Option<String>,

    /// Whether the account is a GitHub site administrator.
    #[serde(default)]
    pub site_admin: bool,
}

/// Reaction counts attached to a resource (release, issue comment, ...).
///
/// All counts default to zero when the API omits them.
///
/// # Example
///
/// ```rust
/// use octorest::api::common::ReactionRollup;
///
/// let json = r#"{"total_count": 3, "+1": 2, "heart": 1}"#;
/// let reactions: ReactionRollup = serde_json::from_str(json).unwrap();
/// assert_eq!(reactions.plus_one, 2);
/// assert_eq!(reactions.minus_one, 0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReactionRollup {
    /// Total number of reactions across all kinds.
    #[serde(default)]
    pub total_count: u64,

    /// Thumbs-up reactions. The API spells this field `"+1"`.
    #[serde(default, rename = "+1")]
    pub plus_one: u64,

    /// Thumbs-down reactions. The API spells this field `"-1"`.
    #[serde(default, rename = "-1")]
    pub minus_one: u64,

    /// Laugh reactions.
    #[serde(default)]
    pub laugh: u64,

    /// Confused reactions.
    #[serde(default)]
    pub confused: u64,

    /// Heart reactions.
    #[serde(default)]
    pub heart: u64,

    /// Hooray reactions.
    #[serde(default)]
    pub hooray: u64,

    /// Eyes reactions.
    #[serde(default)]
    pub eyes: u64,

    /// Rocket reactions.
    #[serde(default)]
    pub rocket: u64,
}

/// Abbreviated repository reference.
///
/// Embedded wherever a response carries a list of repositories without their
/// full detail (secret visibility selections, migration manifests).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimalRepository {
    /// Numeric repository id.
    pub id: u64,

    /// Repository name without the owner prefix.
    pub name: String,

    /// `owner/name` form.
    pub full_name: String,

    /// Whether the repository is private.
    #[serde(default)]
    pub private: bool,

    /// Owning account, when the API includes it.
    #[serde(default)]
    pub owner: Option<SimpleUser>,
}

/// The kind of a single reaction.
///
/// The API transmits the first two members as the literal strings `"+1"` and
/// `"-1"`; serde renames map them onto proper identifiers. Any string outside
/// this set fails to parse — see
/// [`snapshot::parse_enum`](crate::api::snapshot::parse_enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionContent {
    /// Thumbs up (`"+1"` on the wire).
    #[serde(rename = "+1")]
    PlusOne,

    /// Thumbs down (`"-1"` on the wire).
    #[serde(rename = "-1")]
    MinusOne,

    /// Laugh.
    Laugh,

    /// Confused.
    Confused,

    /// Heart.
    Heart,

    /// Hooray.
    Hooray,

    /// Rocket.
    Rocket,

    /// Eyes.
    Eyes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_status_not_found() {
        let body = r#"{"message": "Not Found", "documentation_url": "https://docs.github.com/rest"}"#;
        match map_status(StatusCode::NOT_FOUND, body) {
            ApiError::NotFound(msg) => assert_eq!(msg, "Not Found"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_map_status_validation_with_errors_array() {
        let body = r#"{"message": "Validation Failed", "errors": [{"resource": "Release", "field": "tag_name", "message": "tag_name is required"}]}"#;
        match map_status(StatusCode::UNPROCESSABLE_ENTITY, body) {
            ApiError::Validation(msg) => {
                assert!(msg.contains("Validation Failed"));
                assert!(msg.contains("tag_name is required"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_map_status_secondary_rate_limit() {
        let body = r#"{"message": "You have exceeded a secondary rate limit."}"#;
        assert!(matches!(
            map_status(StatusCode::FORBIDDEN, body),
            ApiError::RateLimited(_)
        ));
    }

    #[test]
    fn test_map_status_unparsable_body_falls_back_to_raw() {
        match map_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>") {
            ApiError::ServerError(msg) => assert!(msg.contains("<html>boom</html>")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_reaction_rollup_defaults_missing_counts() {
        let json = r#"{"total_count": 3, "+1": 2, "heart": 1}"#;
        let reactions: ReactionRollup = serde_json::from_str(json).unwrap();
        assert_eq!(reactions.total_count, 3);
        assert_eq!(reactions.plus_one, 2);
        assert_eq!(reactions.minus_one, 0);
        assert_eq!(reactions.rocket, 0);
    }

    #[test]
    fn test_reaction_content_wire_aliases() {
        let plus: ReactionContent = serde_json::from_str(r#""+1""#).unwrap();
        let minus: ReactionContent = serde_json::from_str(r#""-1""#).unwrap();
        assert_eq!(plus, ReactionContent::PlusOne);
        assert_eq!(minus, ReactionContent::MinusOne);
        assert!(serde_json::from_str::<ReactionContent>(r#""thumbs""#).is_err());
    }

    #[test]
    fn test_simple_user_tolerates_minimal_payload() {
        let json = r#"{"id": 1, "login": "octocat"}"#;
        let user: SimpleUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.login, "octocat");
        assert!(user.avatar_url.is_none());
        assert!(!user.site_admin);
    }
}
