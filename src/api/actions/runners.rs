//
//  octorest
//  api/actions/runners.rs
//

//! Self-hosted runner API types and operations.
//!
//! Runners can be registered at the organization or repository level; both
//! scopes share the same model. Registration and removal use short-lived
//! tokens minted through bodyless POSTs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::client::GitHubClient;
use crate::api::common::ApiError;
use crate::api::query::Params;

/// Connection status of a runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnerStatus {
    /// The runner is connected and may accept jobs.
    Online,
    /// The runner is not connected.
    Offline,
}

/// Origin of a runner label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelKind {
    /// Assigned by GitHub (`self-hosted`, os and architecture labels).
    #[serde(rename = "read-only")]
    ReadOnly,
    /// Assigned by an administrator.
    #[serde(rename = "custom")]
    Custom,
}

/// A label attached to a runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerLabel {
    /// Numeric label id. Absent on labels that were never persisted.
    #[serde(default)]
    pub id: Option<u64>,

    /// Label text (e.g. `self-hosted`, `linux`, `gpu`).
    pub name: String,

    /// Whether the label is GitHub-assigned or custom.
    #[serde(default, rename = "type")]
    pub kind: Option<LabelKind>,
}

/// A self-hosted runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    /// Numeric runner id.
    pub id: u64,

    /// Runner name as registered.
    pub name: String,

    /// Operating system reported by the runner.
    #[serde(default)]
    pub os: Option<String>,

    /// Connection status.
    #[serde(default)]
    pub status: Option<RunnerStatus>,

    /// Whether the runner is currently executing a job.
    #[serde(default)]
    pub busy: bool,

    /// Labels attached to the runner, in API order.
    #[serde(default)]
    pub labels: Vec<RunnerLabel>,
}

/// List wrapper for runners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runners {
    /// Reported size of the full collection; may exceed the page length.
    pub total_count: u64,

    /// The runners on this page, in API order.
    pub runners: Vec<Runner>,
}

/// A short-lived registration or removal token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerToken {
    /// The token value, passed to the runner agent's `config` script.
    pub token: String,

    /// When the token expires (about one hour after minting).
    pub expires_at: DateTime<Utc>,
}

/// Endpoint manager for self-hosted runners.
///
/// Obtained from [`GitHubClient::runners`].
pub struct RunnersManager<'a> {
    client: &'a GitHubClient,
}

impl<'a> RunnersManager<'a> {
    pub(crate) fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    // --- organization scope ------------------------------------------------

    /// Lists the self-hosted runners of an organization.
    ///
    /// `GET /orgs/{org}/actions/runners`
    pub async fn list_for_org(&self, org: &str) -> Result<Runners, ApiError> {
        self.client.get(&format!("/orgs/{org}/actions/runners")).await
    }

    /// Lists organization runners with pagination parameters.
    pub async fn list_for_org_with(&self, org: &str, params: &Params) -> Result<Runners, ApiError> {
        self.client
            .get_with(&format!("/orgs/{org}/actions/runners"), params)
            .await
    }

    /// Gets one organization runner.
    ///
    /// `GET /orgs/{org}/actions/runners/{runner_id}`
    pub async fn get_for_org(&self, org: &str, runner_id: u64) -> Result<Runner, ApiError> {
        self.client
            .get(&format!("/orgs/{org}/actions/runners/{runner_id}"))
            .await
    }

    /// Removes a runner from an organization.
    ///
    /// `DELETE /orgs/{org}/actions/runners/{runner_id}` (204)
    pub async fn delete_from_org(&self, org: &str, runner_id: u64) -> Result<(), ApiError> {
        self.client
            .delete_unit(&format!("/orgs/{org}/actions/runners/{runner_id}"))
            .await
    }

    /// Mints a registration token for adding a runner to an organization.
    ///
    /// `POST /orgs/{org}/actions/runners/registration-token`
    pub async fn org_registration_token(&self, org: &str) -> Result<RunnerToken, ApiError> {
        self.client
            .post_empty(&format!("/orgs/{org}/actions/runners/registration-token"))
            .await
    }

    /// Mints a removal token for detaching an organization runner.
    ///
    /// `POST /orgs/{org}/actions/runners/remove-token`
    pub async fn org_remove_token(&self, org: &str) -> Result<RunnerToken, ApiError> {
        self.client
            .post_empty(&format!("/orgs/{org}/actions/runners/remove-token"))
            .await
    }

    // --- repository scope --------------------------------------------------

    /// Lists the self-hosted runners of a repository.
    ///
    /// `GET /repos/{owner}/{repo}/actions/runners`
    pub async fn list_for_repo(&self, owner: &str, repo: &str) -> Result<Runners, ApiError> {
        self.client
            .get(&format!("/repos/{owner}/{repo}/actions/runners"))
            .await
    }

    /// Gets one repository runner.
    pub async fn get_for_repo(
        &self,
        owner: &str,
        repo: &str,
        runner_id: u64,
    ) -> Result<Runner, ApiError> {
        self.client
            .get(&format!("/repos/{owner}/{repo}/actions/runners/{runner_id}"))
            .await
    }

    /// Removes a runner from a repository.
    ///
    /// `DELETE /repos/{owner}/{repo}/actions/runners/{runner_id}` (204)
    pub async fn delete_from_repo(
        &self,
        owner: &str,
        repo: &str,
        runner_id: u64,
    ) -> Result<(), ApiError> {
        self.client
            .delete_unit(&format!("/repos/{owner}/{repo}/actions/runners/{runner_id}"))
            .await
    }

    /// Mints a registration token for adding a runner to a repository.
    pub async fn repo_registration_token(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<RunnerToken, ApiError> {
        self.client
            .post_empty(&format!(
                "/repos/{owner}/{repo}/actions/runners/registration-token"
            ))
            .await
    }

    /// Mints a removal token for detaching a repository runner.
    pub async fn repo_remove_token(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<RunnerToken, ApiError> {
        self.client
            .post_empty(&format!("/repos/{owner}/{repo}/actions/runners/remove-token"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_runner_decode() {
        let json = r#"{"id": 42, "name": "runner-1", "busy": true, "labels": []}"#;
        let runner: Runner = serde_json::from_str(json).unwrap();
        assert_eq!(runner.id, 42);
        assert_eq!(runner.name, "runner-1");
        assert!(runner.busy);
        assert!(runner.labels.is_empty());
        assert!(runner.os.is_none());
        assert!(runner.status.is_none());
    }

    #[test]
    fn test_full_runner_decode() {
        let json = r#"{
            "id": 23,
            "name": "MBP",
            "os": "macos",
            "status": "online",
            "busy": false,
            "labels": [
                {"id": 5, "name": "self-hosted", "type": "read-only"},
                {"id": 7, "name": "gpu", "type": "custom"}
            ]
        }"#;
        let runner: Runner = serde_json::from_str(json).unwrap();
        assert_eq!(runner.status, Some(RunnerStatus::Online));
        assert_eq!(runner.labels.len(), 2);
        assert_eq!(runner.labels[0].kind, Some(LabelKind::ReadOnly));
        assert_eq!(runner.labels[1].kind, Some(LabelKind::Custom));
        // Source order is preserved.
        assert_eq!(runner.labels[0].name, "self-hosted");
    }

    #[test]
    fn test_runner_list_wrapper() {
        let json = r#"{
            "total_count": 2,
            "runners": [
                {"id": 1, "name": "a", "busy": false},
                {"id": 2, "name": "b", "busy": true}
            ]
        }"#;
        let runners: Runners = serde_json::from_str(json).unwrap();
        assert_eq!(runners.total_count, 2);
        assert_eq!(runners.runners[1].id, 2);
    }

    #[test]
    fn test_unknown_status_fails_decode() {
        let json = r#"{"id": 1, "name": "a", "status": "idle"}"#;
        assert!(serde_json::from_str::<Runner>(json).is_err());
    }

    #[test]
    fn test_runner_token_decode() {
        let json = r#"{"token": "LLBF3JGZDX3P5PMEXLND6TS6FCWO6", "expires_at": "2020-01-22T12:13:35.123Z"}"#;
        let token: RunnerToken = serde_json::from_str(json).unwrap();
        assert!(token.token.starts_with("LLBF"));
    }
}
