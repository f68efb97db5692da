//
//  octorest
//  config/mod.rs
//

//! Client Configuration
//!
//! [`ClientConfig`] carries everything one [`GitHubClient`] instance needs:
//! the credential, the API root (overridable for GitHub Enterprise Server or
//! a test server), the `User-Agent` string GitHub requires, and the
//! per-request timeout.
//!
//! Configuration is explicit and per-instance. The library never reads or
//! writes a process-global credential; if the embedding application wants
//! environment-driven setup, [`ClientConfig::from_env`] is the one sanctioned
//! convenience.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use octorest::config::ClientConfig;
//!
//! let config = ClientConfig::new()
//!     .token("ghp_example")
//!     .timeout(Duration::from_secs(10));
//!
//! assert_eq!(config.api_root, "https://api.github.com");
//! ```

use std::env;
use std::time::Duration;

use crate::auth::AuthCredential;

/// Default API root for github.com.
pub const DEFAULT_API_ROOT: &str = "https://api.github.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a single [`GitHubClient`](crate::api::GitHubClient).
///
/// Built with chaining setters; every field has a sensible default except
/// the credential, which stays `None` (unauthenticated requests work against
/// public endpoints, with lower rate limits).
///
/// # Fields
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `auth` | `None` | Credential applied to every request |
/// | `api_root` | `https://api.github.com` | Base URL, no trailing slash |
/// | `user_agent` | `octorest/<version>` | Required by GitHub |
/// | `timeout` | 30 s | Per-request timeout |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Credential applied to every request, if any.
    pub auth: Option<AuthCredential>,

    /// Base URL of the API, without a trailing slash.
    pub api_root: String,

    /// `User-Agent` header value. GitHub rejects requests without one.
    pub user_agent: String,

    /// Per-request timeout applied by the underlying HTTP client.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth: None,
            api_root: DEFAULT_API_ROOT.to_string(),
            user_agent: format!("octorest/{}", crate::VERSION),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration with all defaults and no credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from the environment.
    ///
    /// Reads `GITHUB_TOKEN` for the credential and `GITHUB_API_URL` for the
    /// API root (the same variables GitHub Actions populates). Unset
    /// variables leave the defaults in place.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(token) = env::var("GITHUB_TOKEN") {
            if !token.is_empty() {
                config.auth = Some(AuthCredential::token(token));
            }
        }
        if let Ok(root) = env::var("GITHUB_API_URL") {
            if !root.is_empty() {
                config.api_root = root.trim_end_matches('/').to_string();
            }
        }
        config
    }

    /// Sets a personal access token credential.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(AuthCredential::token(token));
        self
    }

    /// Sets an arbitrary credential.
    pub fn auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Overrides the API root (GitHub Enterprise Server, mock server).
    ///
    /// A trailing slash is stripped so path concatenation stays uniform.
    pub fn api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the `User-Agent` header value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Overrides the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new();
        assert!(config.auth.is_none());
        assert_eq!(config.api_root, DEFAULT_API_ROOT);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.user_agent.starts_with("octorest/"));
    }

    #[test]
    fn test_api_root_strips_trailing_slash() {
        let config = ClientConfig::new().api_root("https://ghe.example.com/api/v3/");
        assert_eq!(config.api_root, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_builder_chaining() {
        let config = ClientConfig::new()
            .token("ghp_x")
            .user_agent("my-app/1.0")
            .timeout(Duration::from_secs(5));
        assert!(config.auth.is_some());
        assert_eq!(config.user_agent, "my-app/1.0");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
