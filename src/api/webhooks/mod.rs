//
//  octorest
//  api/webhooks/mod.rs
//

//! Webhook API types and operations.
//!
//! Covers repository and organization webhooks: list, get, create, update,
//! delete and ping. The `insecure_ssl` config field is the one oddity — the
//! API transmits it as either the string `"0"`/`"1"` or the number `0`/`1`
//! depending on how the hook was created, so decoding coerces both onto a
//! boolean.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::api::client::GitHubClient;
use crate::api::common::ApiError;
use crate::api::query::Params;

/// Delivery configuration of a webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookConfig {
    /// Delivery URL.
    #[serde(default)]
    pub url: Option<String>,

    /// Payload content type: `json` or `form`.
    #[serde(default)]
    pub content_type: Option<String>,

    /// Shared secret used to sign deliveries. The API redacts this to
    /// `********` on reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// Whether TLS verification is disabled for deliveries.
    ///
    /// Wire format is `"0"`/`"1"` (string) or `0`/`1` (number).
    #[serde(
        default,
        deserialize_with = "de_insecure_ssl",
        skip_serializing_if = "Option::is_none"
    )]
    pub insecure_ssl: Option<bool>,
}

/// Accepts `"0"`, `"1"`, `0`, `1` (and plain booleans) for `insecure_ssl`.
fn de_insecure_ssl<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Num(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Bool(b)) => Some(b),
        Some(Raw::Num(n)) => Some(n != 0.0),
        Some(Raw::Text(s)) => Some(s == "1"),
    })
}

/// A webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hook {
    /// Numeric hook id.
    pub id: u64,

    /// Hook name; always `"web"` for webhooks.
    pub name: String,

    /// Whether deliveries are active.
    #[serde(default)]
    pub active: bool,

    /// Event names the hook subscribes to, in API order.
    #[serde(default)]
    pub events: Vec<String>,

    /// Delivery configuration. Absent decodes as all-default.
    #[serde(default)]
    pub config: HookConfig,

    /// When the hook was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the hook was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// API URL of this hook.
    #[serde(default)]
    pub url: Option<String>,

    /// URL used to trigger a ping delivery.
    #[serde(default)]
    pub ping_url: Option<String>,

    /// URL of the deliveries resource.
    #[serde(default)]
    pub deliveries_url: Option<String>,

    /// Scope of the hook: `Repository` or `Organization`.
    #[serde(default, rename = "type")]
    pub hook_type: Option<String>,
}

/// Payload for creating a webhook.
#[derive(Debug, Clone, Serialize)]
pub struct CreateHook {
    /// Must be `"web"`; kept explicit because the API requires it.
    pub name: String,

    /// Delivery configuration; `url` is required by the API.
    pub config: HookConfig,

    /// Events to subscribe to. Defaults to `["push"]` server-side when
    /// empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,

    /// Whether deliveries start active.
    pub active: bool,
}

impl CreateHook {
    /// A hook delivering JSON payloads of the given events to `url`.
    pub fn web(url: impl Into<String>, events: Vec<String>) -> Self {
        Self {
            name: "web".to_string(),
            config: HookConfig {
                url: Some(url.into()),
                content_type: Some("json".to_string()),
                secret: None,
                insecure_ssl: None,
            },
            events,
            active: true,
        }
    }
}

/// Payload for updating a webhook. Every field is optional.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateHook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<HookConfig>,

    /// Replaces the full event list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,

    /// Events to add to the current list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_events: Option<Vec<String>>,

    /// Events to remove from the current list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_events: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Endpoint manager for webhooks.
///
/// Obtained from [`GitHubClient::webhooks`].
pub struct WebhooksManager<'a> {
    client: &'a GitHubClient,
}

impl<'a> WebhooksManager<'a> {
    pub(crate) fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    // --- repository scope --------------------------------------------------

    /// Lists the webhooks of a repository.
    ///
    /// `GET /repos/{owner}/{repo}/hooks`
    pub async fn list(&self, owner: &str, repo: &str) -> Result<Vec<Hook>, ApiError> {
        self.client.get(&format!("/repos/{owner}/{repo}/hooks")).await
    }

    /// Lists repository webhooks with pagination parameters.
    pub async fn list_with(
        &self,
        owner: &str,
        repo: &str,
        params: &Params,
    ) -> Result<Vec<Hook>, ApiError> {
        self.client
            .get_with(&format!("/repos/{owner}/{repo}/hooks"), params)
            .await
    }

    /// Gets a repository webhook.
    ///
    /// `GET /repos/{owner}/{repo}/hooks/{hook_id}`
    pub async fn get(&self, owner: &str, repo: &str, hook_id: u64) -> Result<Hook, ApiError> {
        self.client
            .get(&format!("/repos/{owner}/{repo}/hooks/{hook_id}"))
            .await
    }

    /// Creates a repository webhook.
    ///
    /// `POST /repos/{owner}/{repo}/hooks` (201, echoes the entity)
    pub async fn create(
        &self,
        owner: &str,
        repo: &str,
        create: &CreateHook,
    ) -> Result<Hook, ApiError> {
        self.client
            .post(&format!("/repos/{owner}/{repo}/hooks"), create)
            .await
    }

    /// Updates a repository webhook.
    ///
    /// `PATCH /repos/{owner}/{repo}/hooks/{hook_id}` (echoes the entity)
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        hook_id: u64,
        update: &UpdateHook,
    ) -> Result<Hook, ApiError> {
        self.client
            .patch(&format!("/repos/{owner}/{repo}/hooks/{hook_id}"), update)
            .await
    }

    /// Deletes a repository webhook.
    ///
    /// `DELETE /repos/{owner}/{repo}/hooks/{hook_id}` (204)
    pub async fn delete(&self, owner: &str, repo: &str, hook_id: u64) -> Result<(), ApiError> {
        self.client
            .delete_unit(&format!("/repos/{owner}/{repo}/hooks/{hook_id}"))
            .await
    }

    /// Triggers a ping delivery for a repository webhook.
    ///
    /// `POST /repos/{owner}/{repo}/hooks/{hook_id}/pings` (204)
    pub async fn ping(&self, owner: &str, repo: &str, hook_id: u64) -> Result<(), ApiError> {
        self.client
            .post_empty_unit(&format!("/repos/{owner}/{repo}/hooks/{hook_id}/pings"))
            .await
    }

    // --- organization scope ------------------------------------------------

    /// Lists the webhooks of an organization.
    ///
    /// `GET /orgs/{org}/hooks`
    pub async fn list_for_org(&self, org: &str) -> Result<Vec<Hook>, ApiError> {
        self.client.get(&format!("/orgs/{org}/hooks")).await
    }

    /// Gets an organization webhook.
    pub async fn get_for_org(&self, org: &str, hook_id: u64) -> Result<Hook, ApiError> {
        self.client.get(&format!("/orgs/{org}/hooks/{hook_id}")).await
    }

    /// Creates an organization webhook.
    pub async fn create_for_org(&self, org: &str, create: &CreateHook) -> Result<Hook, ApiError> {
        self.client.post(&format!("/orgs/{org}/hooks"), create).await
    }

    /// Updates an organization webhook.
    ///
    /// `PATCH /orgs/{org}/hooks/{hook_id}` (echoes the entity)
    pub async fn update_for_org(
        &self,
        org: &str,
        hook_id: u64,
        update: &UpdateHook,
    ) -> Result<Hook, ApiError> {
        self.client
            .patch(&format!("/orgs/{org}/hooks/{hook_id}"), update)
            .await
    }

    /// Deletes an organization webhook.
    pub async fn delete_for_org(&self, org: &str, hook_id: u64) -> Result<(), ApiError> {
        self.client
            .delete_unit(&format!("/orgs/{org}/hooks/{hook_id}"))
            .await
    }

    /// Triggers a ping delivery for an organization webhook.
    pub async fn ping_for_org(&self, org: &str, hook_id: u64) -> Result<(), ApiError> {
        self.client
            .post_empty_unit(&format!("/orgs/{org}/hooks/{hook_id}/pings"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_decode() {
        let json = r#"{
            "id": 12345678,
            "name": "web",
            "active": true,
            "events": ["push", "pull_request"],
            "config": {"url": "https://example.com/webhook", "content_type": "json", "insecure_ssl": "0"},
            "created_at": "2019-06-03T00:57:16Z",
            "updated_at": "2019-06-03T00:57:16Z",
            "type": "Repository"
        }"#;
        let hook: Hook = serde_json::from_str(json).unwrap();
        assert!(hook.active);
        assert_eq!(hook.events, vec!["push", "pull_request"]);
        assert_eq!(hook.config.insecure_ssl, Some(false));
        assert_eq!(hook.hook_type.as_deref(), Some("Repository"));
    }

    #[test]
    fn test_insecure_ssl_coercion_forms() {
        for (raw, expected) in [
            (r#"{"insecure_ssl": "0"}"#, Some(false)),
            (r#"{"insecure_ssl": "1"}"#, Some(true)),
            (r#"{"insecure_ssl": 0}"#, Some(false)),
            (r#"{"insecure_ssl": 1}"#, Some(true)),
            (r#"{}"#, None),
        ] {
            let config: HookConfig = serde_json::from_str(raw).unwrap();
            assert_eq!(config.insecure_ssl, expected, "input: {raw}");
        }
    }

    #[test]
    fn test_hook_missing_config_defaults() {
        let json = r#"{"id": 1, "name": "web"}"#;
        let hook: Hook = serde_json::from_str(json).unwrap();
        assert!(hook.config.url.is_none());
        assert!(hook.events.is_empty());
        assert!(!hook.active);
    }

    #[test]
    fn test_create_hook_serialization() {
        let create = CreateHook::web("https://example.com/webhook", vec!["push".to_string()]);
        let json = serde_json::to_value(&create).unwrap();
        assert_eq!(json["name"], "web");
        assert_eq!(json["config"]["url"], "https://example.com/webhook");
        assert_eq!(json["events"][0], "push");
        // Redacted/unset fields never serialize.
        assert!(json["config"].get("secret").is_none());
    }
}
