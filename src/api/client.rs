//
//  octorest
//  api/client.rs
//

//! # HTTP Client for the GitHub REST API
//!
//! This module provides the core HTTP client shared by every endpoint
//! manager. It handles authentication header injection, the standard GitHub
//! request headers, status-code mapping and response decoding.
//!
//! ## Response shapes
//!
//! Read operations come in three named forms, selected at compile time:
//!
//! - [`GitHubClient::get`] — decoded into a typed model
//! - [`GitHubClient::get_json`] — generic parsed [`serde_json::Value`]
//! - [`GitHubClient::get_raw`] — the raw response text
//!
//! All three are views of the same body: anything present in the typed model
//! is derivable from the JSON value, and both are parsed from the raw text.
//!
//! ## Write semantics
//!
//! Mutating operations return `Result<(), ApiError>` (for 204-style
//! endpoints) or `Result<Entity, ApiError>` (for creates/updates that echo
//! the entity). A non-2xx status is always an `Err` carrying the parsed
//! error payload; nothing is swallowed into a boolean.

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::auth::AuthCredential;
use crate::config::ClientConfig;

use super::actions::permissions::ActionsPermissionsManager;
use super::actions::runners::RunnersManager;
use super::actions::secrets::SecretsManager;
use super::actions::workflows::WorkflowsManager;
use super::checks::ChecksManager;
use super::common::{map_status, ApiError};
use super::migrations::MigrationsManager;
use super::query::Params;
use super::releases::ReleasesManager;
use super::webhooks::WebhooksManager;

/// REST API version header value sent with every request.
const API_VERSION: &str = "2022-11-28";

/// The media type GitHub recommends for REST requests.
const ACCEPT: &str = "application/vnd.github+json";

/// The main HTTP client for the GitHub REST API.
///
/// One `GitHubClient` owns one connection pool, one credential and one
/// configuration; it is cheap to clone and safe to share across tasks. All
/// endpoint managers borrow it.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use octorest::api::GitHubClient;
/// use octorest::config::ClientConfig;
///
/// let client = GitHubClient::new(ClientConfig::new().token("ghp_example"))?;
/// # Ok::<(), octorest::api::ApiError>(())
/// ```
///
/// # Endpoint managers
///
/// ```rust,no_run
/// # use octorest::api::GitHubClient;
/// # use octorest::config::ClientConfig;
/// # async fn example() -> Result<(), octorest::api::ApiError> {
/// # let client = GitHubClient::new(ClientConfig::new())?;
/// let runners = client.runners().list_for_org("my-org").await?;
/// println!("{} of {} runners on this page", runners.runners.len(), runners.total_count);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The underlying HTTP client.
    http: Client,
    /// Base URL of the API, without a trailing slash.
    api_root: String,
    /// Optional credential applied to every request.
    auth: Option<AuthCredential>,
}

impl GitHubClient {
    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] when the underlying HTTP client cannot
    /// be constructed (TLS backend initialization, invalid user agent).
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            api_root: config.api_root,
            auth: config.auth,
        })
    }

    /// Creates a client from the environment (`GITHUB_TOKEN`, `GITHUB_API_URL`).
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::from_env())
    }

    /// Returns the configured API root.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    // --- endpoint managers -------------------------------------------------

    /// Actions permissions endpoints (`/orgs/{org}/actions/permissions`, ...).
    pub fn actions_permissions(&self) -> ActionsPermissionsManager<'_> {
        ActionsPermissionsManager::new(self)
    }

    /// Actions secrets endpoints (`.../actions/secrets`).
    pub fn secrets(&self) -> SecretsManager<'_> {
        SecretsManager::new(self)
    }

    /// Workflow endpoints (`/repos/{owner}/{repo}/actions/workflows`).
    pub fn workflows(&self) -> WorkflowsManager<'_> {
        WorkflowsManager::new(self)
    }

    /// Self-hosted runner endpoints (`.../actions/runners`).
    pub fn runners(&self) -> RunnersManager<'_> {
        RunnersManager::new(self)
    }

    /// Check-run endpoints (`/repos/{owner}/{repo}/check-runs`).
    pub fn checks(&self) -> ChecksManager<'_> {
        ChecksManager::new(self)
    }

    /// Release endpoints (`/repos/{owner}/{repo}/releases`).
    pub fn releases(&self) -> ReleasesManager<'_> {
        ReleasesManager::new(self)
    }

    /// Webhook endpoints (`/repos/{owner}/{repo}/hooks`, `/orgs/{org}/hooks`).
    pub fn webhooks(&self) -> WebhooksManager<'_> {
        WebhooksManager::new(self)
    }

    /// Organization migration endpoints (`/orgs/{org}/migrations`).
    pub fn migrations(&self) -> MigrationsManager<'_> {
        MigrationsManager::new(self)
    }

    // --- reads -------------------------------------------------------------

    /// Makes a GET request and decodes the response into a typed model.
    ///
    /// # Errors
    ///
    /// Propagates transport failures as [`ApiError::Network`], non-success
    /// statuses as their mapped variants, and shape mismatches as
    /// [`ApiError::Decode`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.get_raw(path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// [`get`](Self::get) with query parameters appended.
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Params,
    ) -> Result<T, ApiError> {
        let body = self.get_raw_with(path, params).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Makes a GET request and returns the generically parsed JSON value.
    pub async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let body = self.get_raw(path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// [`get_json`](Self::get_json) with query parameters appended.
    pub async fn get_json_with(&self, path: &str, params: &Params) -> Result<Value, ApiError> {
        let body = self.get_raw_with(path, params).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Makes a GET request and returns the raw response text.
    pub async fn get_raw(&self, path: &str) -> Result<String, ApiError> {
        self.execute(self.request(Method::GET, path)).await
    }

    /// [`get_raw`](Self::get_raw) with query parameters appended.
    pub async fn get_raw_with(&self, path: &str, params: &Params) -> Result<String, ApiError> {
        let path = format!("{}{}", path, params.to_query_string());
        self.execute(self.request(Method::GET, &path)).await
    }

    // --- writes ------------------------------------------------------------

    /// Makes a POST request with a JSON body, decoding the echoed entity.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let text = self
            .execute(self.request(Method::POST, path).json(body))
            .await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Makes a bodyless POST request, decoding the echoed entity.
    ///
    /// Used by token-minting endpoints (runner registration tokens) that
    /// take no request payload.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let text = self.execute(self.request(Method::POST, path)).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Makes a POST request with a JSON body where success carries no entity
    /// (HTTP 204 / 201 with empty body).
    pub async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.execute(self.request(Method::POST, path).json(body))
            .await?;
        Ok(())
    }

    /// Makes a bodyless POST request where success carries no entity
    /// (e.g. webhook pings).
    pub async fn post_empty_unit(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::POST, path)).await?;
        Ok(())
    }

    /// Makes a PATCH request with a JSON body, decoding the echoed entity.
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let text = self
            .execute(self.request(Method::PATCH, path).json(body))
            .await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Makes a PUT request with a JSON body where success carries no entity
    /// (the common shape for "set"/"enable" endpoints, HTTP 204).
    pub async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.execute(self.request(Method::PUT, path).json(body))
            .await?;
        Ok(())
    }

    /// Makes a bodyless PUT request where success carries no entity.
    pub async fn put_empty_unit(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::PUT, path)).await?;
        Ok(())
    }

    /// Makes a DELETE request where success carries no entity (HTTP 204).
    pub async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    // --- internals ---------------------------------------------------------

    /// Builds a request for `path` with the standard headers and credential.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_root, path);
        let mut request = self
            .http
            .request(method, &url)
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(auth) = &self.auth {
            request = auth.apply_to_request(request);
        }
        request
    }

    /// Sends a request, returning the body on 2xx and a mapped error
    /// otherwise.
    async fn execute(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::debug!("request failed with {}", status);
            // A 401 on an unauthenticated client is a missing credential,
            // not a rejected one.
            if status == StatusCode::UNAUTHORIZED && self.auth.is_none() {
                return Err(ApiError::AuthRequired);
            }
            return Err(map_status(status, &text));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(String::new());
        }
        Ok(text)
    }
}
