//
//  octorest
//  api/query.rs
//

//! Query-Parameter Construction
//!
//! [`Params`] is an ordered key/value container serialized into a
//! URL-encoded query string. Endpoint managers use it for pagination
//! (`per_page`/`page`) and the assorted filters GitHub list endpoints accept.
//!
//! # Example
//!
//! ```rust
//! use octorest::api::Params;
//!
//! let params = Params::new()
//!     .push("per_page", 50)
//!     .push("status", "completed")
//!     .push_opt("branch", Some("main"))
//!     .push_opt::<&str>("actor", None);
//!
//! assert_eq!(params.to_query_string(), "?per_page=50&status=completed&branch=main");
//! ```
//!
//! # Notes
//!
//! - Insertion order is preserved in the output
//! - An empty container serializes to the empty string (no dangling `?`)
//! - Values are URL-encoded via `url::form_urlencoded`

use std::fmt;

use url::form_urlencoded;

/// An ordered set of query parameters.
///
/// Built with the chaining [`push`](Self::push) / [`push_opt`](Self::push_opt)
/// methods and serialized with [`to_query_string`](Self::to_query_string).
#[derive(Debug, Clone, Default)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parameter set carrying the standard pagination pair.
    ///
    /// GitHub list endpoints accept `per_page` (max 100) and a 1-indexed
    /// `page`.
    pub fn paged(per_page: u32, page: u32) -> Self {
        Self::new().push("per_page", per_page).push("page", page)
    }

    /// Appends a parameter.
    pub fn push(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Appends a parameter only when the value is present.
    pub fn push_opt<V: fmt::Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    /// Returns `true` when no parameters have been added.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serializes the parameters into a `?k=v&...` query string.
    ///
    /// Returns the empty string when the set is empty, so the result can be
    /// appended to a path unconditionally.
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let encoded: String = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();
        format!("?{}", encoded)
    }
}
