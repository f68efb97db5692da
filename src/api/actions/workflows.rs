//
//  octorest
//  api/actions/workflows.rs
//

//! Workflow API types and operations.
//!
//! Workflows are the YAML files under `.github/workflows/`. The API exposes
//! them by numeric id or by file name; this module models listing, manual
//! dispatch (`workflow_dispatch`), enable/disable, and billable usage.
//!
//! # Workflow states
//!
//! ```text
//! active <-> disabled_manually
//!        \-> disabled_inactivity (60 days without activity, scheduled runs)
//!        \-> disabled_fork (disabled by default on forks)
//! deleted
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::GitHubClient;
use crate::api::common::ApiError;
use crate::api::query::Params;

/// Lifecycle state of a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// The workflow runs normally.
    Active,
    /// The workflow file was deleted.
    Deleted,
    /// Disabled because the repository is a fork.
    DisabledFork,
    /// Disabled after a period of repository inactivity.
    DisabledInactivity,
    /// Disabled explicitly through the API or UI.
    DisabledManually,
}

/// A workflow definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    /// Numeric workflow id.
    pub id: u64,

    /// Opaque node id.
    #[serde(default)]
    pub node_id: Option<String>,

    /// Display name from the workflow file.
    pub name: String,

    /// Path of the workflow file (e.g. `.github/workflows/ci.yml`).
    pub path: String,

    /// Current lifecycle state.
    pub state: WorkflowState,

    /// When the workflow was created.
    pub created_at: DateTime<Utc>,

    /// When the workflow was last updated.
    pub updated_at: DateTime<Utc>,

    /// API URL of this workflow.
    #[serde(default)]
    pub url: Option<String>,

    /// Web URL of the workflow file.
    #[serde(default)]
    pub html_url: Option<String>,

    /// URL of the status badge SVG.
    #[serde(default)]
    pub badge_url: Option<String>,
}

/// List wrapper for workflows.
///
/// `total_count` reflects the full collection and may exceed
/// `workflows.len()` on a paginated response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflows {
    /// Reported size of the full collection.
    pub total_count: u64,

    /// The workflows on this page, in API order.
    pub workflows: Vec<Workflow>,
}

/// Billable milliseconds for one runner operating system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillableRun {
    /// Total billable milliseconds.
    #[serde(default)]
    pub total_ms: u64,
}

/// Billable usage broken down by runner operating system.
///
/// Each OS entry is absent when the workflow never ran on that OS; nested
/// decomposition stays null-tolerant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowBillable {
    /// Usage on Ubuntu runners.
    #[serde(default, rename = "UBUNTU")]
    pub ubuntu: Option<BillableRun>,

    /// Usage on macOS runners.
    #[serde(default, rename = "MACOS")]
    pub macos: Option<BillableRun>,

    /// Usage on Windows runners.
    #[serde(default, rename = "WINDOWS")]
    pub windows: Option<BillableRun>,
}

/// Workflow usage response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowUsage {
    /// Billable usage per runner OS.
    #[serde(default)]
    pub billable: WorkflowBillable,
}

/// Payload for a `workflow_dispatch` event.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowDispatch {
    /// The git reference (branch or tag) to run the workflow on.
    #[serde(rename = "ref")]
    pub git_ref: String,

    /// Input values declared by the workflow's `workflow_dispatch` trigger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Value>,
}

impl WorkflowDispatch {
    /// Dispatch on a reference with no inputs.
    pub fn on_ref(git_ref: impl Into<String>) -> Self {
        Self {
            git_ref: git_ref.into(),
            inputs: None,
        }
    }
}

/// Endpoint manager for workflows.
///
/// Obtained from [`GitHubClient::workflows`].
pub struct WorkflowsManager<'a> {
    client: &'a GitHubClient,
}

impl<'a> WorkflowsManager<'a> {
    pub(crate) fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists the workflows of a repository.
    ///
    /// `GET /repos/{owner}/{repo}/actions/workflows`
    pub async fn list(&self, owner: &str, repo: &str) -> Result<Workflows, ApiError> {
        self.client
            .get(&format!("/repos/{owner}/{repo}/actions/workflows"))
            .await
    }

    /// Lists workflows with pagination parameters.
    pub async fn list_with(
        &self,
        owner: &str,
        repo: &str,
        params: &Params,
    ) -> Result<Workflows, ApiError> {
        self.client
            .get_with(&format!("/repos/{owner}/{repo}/actions/workflows"), params)
            .await
    }

    /// Gets a workflow by numeric id.
    ///
    /// `GET /repos/{owner}/{repo}/actions/workflows/{workflow_id}`
    pub async fn get(&self, owner: &str, repo: &str, workflow_id: u64) -> Result<Workflow, ApiError> {
        self.client
            .get(&format!(
                "/repos/{owner}/{repo}/actions/workflows/{workflow_id}"
            ))
            .await
    }

    /// Gets a workflow by file name (e.g. `ci.yml`).
    pub async fn get_by_file_name(
        &self,
        owner: &str,
        repo: &str,
        file_name: &str,
    ) -> Result<Workflow, ApiError> {
        self.client
            .get(&format!(
                "/repos/{owner}/{repo}/actions/workflows/{file_name}"
            ))
            .await
    }

    /// Gets the billable usage of a workflow.
    ///
    /// `GET /repos/{owner}/{repo}/actions/workflows/{workflow_id}/timing`
    pub async fn usage(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: u64,
    ) -> Result<WorkflowUsage, ApiError> {
        self.client
            .get(&format!(
                "/repos/{owner}/{repo}/actions/workflows/{workflow_id}/timing"
            ))
            .await
    }

    /// Triggers a `workflow_dispatch` event.
    ///
    /// `POST /repos/{owner}/{repo}/actions/workflows/{workflow_id}/dispatches` (204)
    pub async fn dispatch(
        &self,
        owner: &str,
        repo: &str,
        workflow_id: u64,
        dispatch: &WorkflowDispatch,
    ) -> Result<(), ApiError> {
        self.client
            .post_unit(
                &format!("/repos/{owner}/{repo}/actions/workflows/{workflow_id}/dispatches"),
                dispatch,
            )
            .await
    }

    /// Enables a workflow.
    ///
    /// `PUT /repos/{owner}/{repo}/actions/workflows/{workflow_id}/enable` (204)
    pub async fn enable(&self, owner: &str, repo: &str, workflow_id: u64) -> Result<(), ApiError> {
        self.client
            .put_empty_unit(&format!(
                "/repos/{owner}/{repo}/actions/workflows/{workflow_id}/enable"
            ))
            .await
    }

    /// Disables a workflow.
    ///
    /// `PUT /repos/{owner}/{repo}/actions/workflows/{workflow_id}/disable` (204)
    pub async fn disable(&self, owner: &str, repo: &str, workflow_id: u64) -> Result<(), ApiError> {
        self.client
            .put_empty_unit(&format!(
                "/repos/{owner}/{repo}/actions/workflows/{workflow_id}/disable"
            ))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKFLOW: &str = r#"{
        "id": 161335,
        "node_id": "MDg6V29ya2Zsb3cxNjEzMzU=",
        "name": "CI",
        "path": ".github/workflows/blank.yaml",
        "state": "active",
        "created_at": "2020-01-08T23:48:37Z",
        "updated_at": "2020-01-08T23:50:21Z",
        "badge_url": "https://github.com/octo-org/octo-repo/workflows/CI/badge.svg"
    }"#;

    #[test]
    fn test_workflow_decode() {
        let workflow: Workflow = serde_json::from_str(WORKFLOW).unwrap();
        assert_eq!(workflow.id, 161335);
        assert_eq!(workflow.state, WorkflowState::Active);
        assert!(workflow.url.is_none());
        assert!(workflow.badge_url.is_some());
    }

    #[test]
    fn test_workflow_state_disabled_variants() {
        for (raw, expected) in [
            ("disabled_fork", WorkflowState::DisabledFork),
            ("disabled_inactivity", WorkflowState::DisabledInactivity),
            ("disabled_manually", WorkflowState::DisabledManually),
        ] {
            let state: WorkflowState = serde_json::from_str(&format!("\"{raw}\"")).unwrap();
            assert_eq!(state, expected);
        }
        assert!(serde_json::from_str::<WorkflowState>("\"paused\"").is_err());
    }

    #[test]
    fn test_workflows_list_order_preserved() {
        let json = format!(
            r#"{{"total_count": 2, "workflows": [{WORKFLOW}, {}]}}"#,
            WORKFLOW.replacen("161335", "161336", 1)
        );
        let workflows: Workflows = serde_json::from_str(&json).unwrap();
        assert_eq!(workflows.total_count, 2);
        assert_eq!(workflows.workflows[0].id, 161335);
        assert_eq!(workflows.workflows[1].id, 161336);
    }

    #[test]
    fn test_usage_tolerates_missing_os_entries() {
        let usage: WorkflowUsage =
            serde_json::from_str(r#"{"billable": {"UBUNTU": {"total_ms": 180000}}}"#).unwrap();
        assert_eq!(usage.billable.ubuntu.unwrap().total_ms, 180000);
        assert!(usage.billable.macos.is_none());
        assert!(usage.billable.windows.is_none());
    }

    #[test]
    fn test_dispatch_serialization() {
        let dispatch = WorkflowDispatch::on_ref("main");
        assert_eq!(serde_json::to_string(&dispatch).unwrap(), r#"{"ref":"main"}"#);

        let with_inputs = WorkflowDispatch {
            git_ref: "main".to_string(),
            inputs: Some(serde_json::json!({"environment": "production"})),
        };
        let json = serde_json::to_value(&with_inputs).unwrap();
        assert_eq!(json["inputs"]["environment"], "production");
    }
}
