//
//  octorest
//  auth/mod.rs
//

//! Authentication Credentials
//!
//! GitHub accepts several credential shapes on the same `Authorization`
//! header: classic and fine-grained personal access tokens, OAuth and GitHub
//! App installation tokens (which expire), and basic authentication with a
//! username plus token. [`AuthCredential`] models these and knows how to
//! apply itself to an outgoing request.
//!
//! Credentials are plain values owned by the client instance that carries
//! them. There is deliberately no process-global credential store: two
//! clients in the same process can talk to two accounts.
//!
//! # Example
//!
//! ```rust
//! use octorest::auth::AuthCredential;
//!
//! let pat = AuthCredential::token("ghp_example");
//! assert!(!pat.is_expired());
//! ```

use chrono::{DateTime, Utc};
use reqwest::RequestBuilder;

/// A credential for authenticating GitHub API requests.
///
/// # Variants
///
/// * `PersonalAccessToken` - classic or fine-grained PAT, sent as a bearer
///   token; never expires from the client's perspective
/// * `OAuth` - OAuth or App installation access token with an optional
///   expiry timestamp
/// * `Basic` - username + token basic authentication (mostly useful against
///   GitHub Enterprise Server setups)
#[derive(Debug, Clone, PartialEq)]
pub enum AuthCredential {
    /// A personal access token (classic `ghp_*` or fine-grained `github_pat_*`).
    PersonalAccessToken {
        /// The token value.
        token: String,
    },

    /// An OAuth or GitHub App installation access token.
    OAuth {
        /// The access token value.
        access_token: String,
        /// When the token expires, if known. Installation tokens expire
        /// after one hour.
        expires_at: Option<DateTime<Utc>>,
    },

    /// Username + token basic authentication.
    Basic {
        /// The account login.
        username: String,
        /// The token used in place of a password.
        token: String,
    },
}

impl AuthCredential {
    /// Convenience constructor for a personal access token.
    pub fn token(token: impl Into<String>) -> Self {
        Self::PersonalAccessToken {
            token: token.into(),
        }
    }

    /// Convenience constructor for a non-expiring OAuth token.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self::OAuth {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    /// Applies this credential to an outgoing request.
    ///
    /// Bearer-style credentials set `Authorization: Bearer <token>`; basic
    /// credentials set the standard basic-auth header.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::PersonalAccessToken { token } => request.bearer_auth(token),
            Self::OAuth { access_token, .. } => request.bearer_auth(access_token),
            Self::Basic { username, token } => request.basic_auth(username, Some(token)),
        }
    }

    /// Checks whether the credential has expired.
    ///
    /// Only `OAuth` credentials with an explicit `expires_at` can expire;
    /// everything else always returns `false`. The client does not refuse to
    /// send an expired credential — the API's 401 is authoritative — but
    /// callers managing installation tokens can use this to refresh early.
    pub fn is_expired(&self) -> bool {
        match self {
            Self::OAuth {
                expires_at: Some(expires_at),
                ..
            } => *expires_at <= Utc::now(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_pat_never_expires() {
        assert!(!AuthCredential::token("ghp_x").is_expired());
    }

    #[test]
    fn test_oauth_expiry() {
        let expired = AuthCredential::OAuth {
            access_token: "t".to_string(),
            expires_at: Some(Utc::now() - Duration::hours(1)),
        };
        let fresh = AuthCredential::OAuth {
            access_token: "t".to_string(),
            expires_at: Some(Utc::now() + Duration::hours(1)),
        };
        assert!(expired.is_expired());
        assert!(!fresh.is_expired());
        assert!(!AuthCredential::bearer("t").is_expired());
    }
}
