//
//  octorest
//  lib.rs
//

//! # octorest
//!
//! A typed, asynchronous client library for the GitHub REST API.
//!
//! ## Overview
//!
//! `octorest` wraps a representative slice of the GitHub REST API (v3) behind
//! per-resource-family *endpoint managers*. Each manager composes request
//! paths and query strings, issues the HTTP call through a shared
//! [`GitHubClient`](api::GitHubClient), and decodes the JSON response into an
//! immutable typed model.
//!
//! ## Features
//!
//! - **Typed models**: serde-backed records with null-tolerant defaults for
//!   optional fields and strict enums for closed value sets
//! - **Three response shapes**: typed object, generic parsed JSON, or raw
//!   response text, selected at compile time by calling
//!   [`get`](api::GitHubClient::get), [`get_json`](api::GitHubClient::get_json)
//!   or [`get_raw`](api::GitHubClient::get_raw)
//! - **Explicit configuration**: every client carries its own
//!   [`ClientConfig`](config::ClientConfig) — no process-wide credential state
//! - **Explicit write results**: mutating calls return `Result<(), ApiError>`
//!   (or the created entity), never a boolean with a side-channel error
//!
//! ## Module Structure
//!
//! - [`api`]: the HTTP client, error taxonomy, JSON decoding helpers and the
//!   endpoint managers (actions, checks, releases, webhooks, migrations)
//! - [`auth`]: credential types and request authentication
//! - [`config`]: per-client configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use octorest::api::GitHubClient;
//! use octorest::config::ClientConfig;
//!
//! # async fn example() -> Result<(), octorest::api::ApiError> {
//! let client = GitHubClient::new(ClientConfig::new().token("ghp_example"))?;
//!
//! // Typed read
//! let workflows = client.workflows().list("octocat", "hello-world").await?;
//! println!("{} workflows", workflows.total_count);
//!
//! // 204-style write
//! client.workflows().enable("octocat", "hello-world", 42).await?;
//! # Ok(())
//! # }
//! ```

/// API client, error types, decoding helpers and endpoint managers.
///
/// This is the heart of the crate: [`api::GitHubClient`] plus one submodule
/// per resource family (actions permissions, secrets, workflows, runners,
/// checks, releases, webhooks, migrations).
pub mod api;

/// Authentication credential types.
///
/// Supports personal access tokens, expiring OAuth/installation tokens and
/// basic authentication. Credentials are applied per-request; nothing is
/// stored globally.
pub mod auth;

/// Per-client configuration.
///
/// [`config::ClientConfig`] carries the token, API root, user agent and
/// request timeout for one client instance. Use
/// [`config::ClientConfig::from_env`] to pick up `GITHUB_TOKEN`.
pub mod config;

/// The version of the octorest library.
///
/// This constant is set from `CARGO_PKG_VERSION` at compile time and is used
/// as part of the default `User-Agent` header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
