//
//  octorest
//  api/mod.rs
//

//! # API Client Layer
//!
//! This module provides the HTTP client and endpoint managers for the GitHub
//! REST API (v3) at `api.github.com`.
//!
//! ## Architecture
//!
//! The API layer is organized as follows:
//!
//! - [`client`]: Core HTTP client with authentication, header and status
//!   handling, and the typed/JSON/raw read dispatch
//! - [`common`]: Shared types ([`ApiError`], user references, reactions)
//! - [`snapshot`]: Null-tolerant JSON decoding helpers
//! - [`query`]: Ordered, URL-encoded query-parameter construction
//! - [`actions`]: Actions permissions, secrets, workflows and self-hosted
//!   runners
//! - [`checks`]: Check runs
//! - [`releases`]: Releases and release assets
//! - [`webhooks`]: Repository and organization webhooks
//! - [`migrations`]: Organization migrations
//!
//! ## Usage
//!
//! ```rust,no_run
//! use octorest::api::GitHubClient;
//! use octorest::config::ClientConfig;
//!
//! # async fn example() -> Result<(), octorest::api::ApiError> {
//! let client = GitHubClient::new(ClientConfig::new().token("ghp_example"))?;
//! let release = client.releases().latest("octocat", "hello-world").await?;
//! println!("latest: {}", release.tag_name);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! API errors are returned as [`ApiError`] variants, which map to common HTTP
//! error scenarios:
//!
//! - `AuthRequired` / `AuthFailed`: 401 Unauthorized
//! - `Forbidden`: 403 Forbidden
//! - `NotFound`: 404 Not Found
//! - `Validation`: 422 Unprocessable Entity
//! - `RateLimited`: 429 Too Many Requests (and 403 rate-limit responses)
//! - `ServerError`: 5xx Server Errors

pub mod client;

pub mod common;

pub mod snapshot;

pub mod query;

/// GitHub Actions resource families.
///
/// - [`actions::permissions`]: org/repo Actions permissions and policies
/// - [`actions::secrets`]: encrypted Actions secrets
/// - [`actions::workflows`]: workflow listing, dispatch, enable/disable
/// - [`actions::runners`]: self-hosted runner management
pub mod actions;

pub mod checks;

pub mod releases;

pub mod webhooks;

pub mod migrations;

pub use client::GitHubClient;

pub use common::ApiError;

pub use query::Params;

pub use snapshot::Snapshot;
