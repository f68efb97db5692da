//
//  octorest
//  api/checks/mod.rs
//

//! Check-run API types and operations.
//!
//! Check runs are the per-commit results CI systems attach to a repository.
//! A run moves through `queued -> in_progress -> completed`; once completed
//! it carries a conclusion and optionally a rich [`CheckRunOutput`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::client::GitHubClient;
use crate::api::common::ApiError;
use crate::api::query::Params;

/// Execution phase of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// Waiting for a runner.
    Queued,
    /// Currently executing.
    InProgress,
    /// Finished; see the conclusion.
    Completed,
}

/// Final verdict of a completed check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    /// Further action from the user is required.
    ActionRequired,
    /// The run was cancelled.
    Cancelled,
    /// The run failed.
    Failure,
    /// Neither success nor failure.
    Neutral,
    /// The run succeeded.
    Success,
    /// The run was skipped.
    Skipped,
    /// The result is out of date.
    Stale,
    /// The run exceeded its time budget.
    TimedOut,
}

/// Rich output attached to a check run (title, summary, annotation counts).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckRunOutput {
    /// Short title shown in the checks UI.
    #[serde(default)]
    pub title: Option<String>,

    /// Markdown summary.
    #[serde(default)]
    pub summary: Option<String>,

    /// Full markdown body.
    #[serde(default)]
    pub text: Option<String>,

    /// Number of annotations attached to the run.
    #[serde(default)]
    pub annotations_count: u64,

    /// URL of the annotations resource.
    #[serde(default)]
    pub annotations_url: Option<String>,
}

/// Reference to the check suite a run belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSuiteRef {
    /// Numeric check-suite id.
    pub id: u64,
}

/// A check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRun {
    /// Numeric check-run id.
    pub id: u64,

    /// The commit SHA the run was created for.
    pub head_sha: String,

    /// Display name of the check.
    pub name: String,

    /// Execution phase.
    pub status: CheckStatus,

    /// Final verdict; absent until the run completes.
    #[serde(default)]
    pub conclusion: Option<CheckConclusion>,

    /// Identifier supplied by the integrator.
    #[serde(default)]
    pub external_id: Option<String>,

    /// API URL of this run.
    #[serde(default)]
    pub url: Option<String>,

    /// Web URL of this run.
    #[serde(default)]
    pub html_url: Option<String>,

    /// Integrator-facing details URL.
    #[serde(default)]
    pub details_url: Option<String>,

    /// When execution started.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,

    /// When execution completed.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    /// Rich output, when the integrator attached one.
    #[serde(default)]
    pub output: Option<CheckRunOutput>,

    /// The suite this run belongs to.
    #[serde(default)]
    pub check_suite: Option<CheckSuiteRef>,
}

/// List wrapper for check runs on a git reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRuns {
    /// Reported size of the full collection; may exceed the page length.
    pub total_count: u64,

    /// The runs on this page, in API order.
    pub check_runs: Vec<CheckRun>,
}

/// Payload for creating a check run.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCheckRun {
    /// Display name of the check.
    pub name: String,

    /// The commit SHA to attach the run to.
    pub head_sha: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CheckStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<CheckConclusion>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<CheckRunOutput>,
}

impl CreateCheckRun {
    /// A minimal create payload: name and head SHA only.
    pub fn new(name: impl Into<String>, head_sha: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            head_sha: head_sha.into(),
            details_url: None,
            external_id: None,
            status: None,
            conclusion: None,
            started_at: None,
            completed_at: None,
            output: None,
        }
    }
}

/// Payload for updating a check run. Every field is optional.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCheckRun {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CheckStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<CheckConclusion>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<CheckRunOutput>,
}

/// Endpoint manager for check runs.
///
/// Obtained from [`GitHubClient::checks`]. Note that creating and updating
/// check runs requires GitHub App credentials; personal tokens can only
/// read. The `app` object in responses is ignored by this model.
pub struct ChecksManager<'a> {
    client: &'a GitHubClient,
}

impl<'a> ChecksManager<'a> {
    pub(crate) fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Creates a check run.
    ///
    /// `POST /repos/{owner}/{repo}/check-runs` (201, echoes the entity)
    pub async fn create(
        &self,
        owner: &str,
        repo: &str,
        create: &CreateCheckRun,
    ) -> Result<CheckRun, ApiError> {
        self.client
            .post(&format!("/repos/{owner}/{repo}/check-runs"), create)
            .await
    }

    /// Gets a check run.
    ///
    /// `GET /repos/{owner}/{repo}/check-runs/{check_run_id}`
    pub async fn get(
        &self,
        owner: &str,
        repo: &str,
        check_run_id: u64,
    ) -> Result<CheckRun, ApiError> {
        self.client
            .get(&format!("/repos/{owner}/{repo}/check-runs/{check_run_id}"))
            .await
    }

    /// Updates a check run.
    ///
    /// `PATCH /repos/{owner}/{repo}/check-runs/{check_run_id}` (echoes the entity)
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        check_run_id: u64,
        update: &UpdateCheckRun,
    ) -> Result<CheckRun, ApiError> {
        self.client
            .patch(
                &format!("/repos/{owner}/{repo}/check-runs/{check_run_id}"),
                update,
            )
            .await
    }

    /// Lists the check runs for a git reference (SHA, branch or tag).
    ///
    /// `GET /repos/{owner}/{repo}/commits/{ref}/check-runs`
    pub async fn list_for_ref(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
    ) -> Result<CheckRuns, ApiError> {
        self.client
            .get(&format!("/repos/{owner}/{repo}/commits/{git_ref}/check-runs"))
            .await
    }

    /// Lists check runs for a reference with filter parameters
    /// (`check_name`, `status`, `filter`, pagination).
    pub async fn list_for_ref_with(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        params: &Params,
    ) -> Result<CheckRuns, ApiError> {
        self.client
            .get_with(
                &format!("/repos/{owner}/{repo}/commits/{git_ref}/check-runs"),
                params,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_run_decode_with_nested_output() {
        let json = r#"{
            "id": 4,
            "head_sha": "ce587453ced02b1526dfb4cb910479d431683101",
            "name": "mighty_readme",
            "status": "completed",
            "conclusion": "neutral",
            "started_at": "2018-05-04T01:14:52Z",
            "completed_at": "2018-05-04T01:14:52Z",
            "output": {
                "title": "Mighty Readme report",
                "summary": "There are 0 failures, 2 warnings, and 1 notice.",
                "annotations_count": 3
            },
            "check_suite": {"id": 5}
        }"#;
        let run: CheckRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.status, CheckStatus::Completed);
        assert_eq!(run.conclusion, Some(CheckConclusion::Neutral));
        let output = run.output.unwrap();
        assert_eq!(output.annotations_count, 3);
        assert!(output.text.is_none());
        assert_eq!(run.check_suite.unwrap().id, 5);
    }

    #[test]
    fn test_in_progress_run_has_no_conclusion() {
        let json = r#"{"id": 4, "head_sha": "abc", "name": "build", "status": "in_progress"}"#;
        let run: CheckRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.status, CheckStatus::InProgress);
        assert!(run.conclusion.is_none());
        assert!(run.output.is_none());
    }

    #[test]
    fn test_unknown_conclusion_fails_decode() {
        let json = r#"{"id": 4, "head_sha": "abc", "name": "build", "status": "completed", "conclusion": "mostly_fine"}"#;
        assert!(serde_json::from_str::<CheckRun>(json).is_err());
    }

    #[test]
    fn test_create_payload_skips_absent_fields() {
        let create = CreateCheckRun::new("build", "ce587453");
        assert_eq!(
            serde_json::to_string(&create).unwrap(),
            r#"{"name":"build","head_sha":"ce587453"}"#
        );
    }

    #[test]
    fn test_check_runs_wrapper_count_divergence() {
        let json = r#"{"total_count": 9, "check_runs": [{"id": 1, "head_sha": "a", "name": "x", "status": "queued"}]}"#;
        let runs: CheckRuns = serde_json::from_str(json).unwrap();
        assert_eq!(runs.total_count, 9);
        assert_eq!(runs.check_runs.len(), 1);
    }
}
