//
//  octorest
//  api/actions/permissions.rs
//

//! Actions permissions API types and operations.
//!
//! Controls which repositories in an organization may run GitHub Actions and
//! which actions (GitHub-owned, verified, pattern-matched) they are allowed
//! to use. All "set" endpoints answer 204 on success.
//!
//! # Example
//!
//! ```rust,no_run
//! use octorest::api::GitHubClient;
//! use octorest::api::actions::permissions::{EnabledRepositories, OrgPermissionsUpdate};
//! use octorest::config::ClientConfig;
//!
//! # async fn example() -> Result<(), octorest::api::ApiError> {
//! let client = GitHubClient::new(ClientConfig::from_env())?;
//! let perms = client.actions_permissions().get_for_org("my-org").await?;
//! println!("enabled for: {:?}", perms.enabled_repositories);
//!
//! client.actions_permissions()
//!     .set_for_org("my-org", &OrgPermissionsUpdate {
//!         enabled_repositories: EnabledRepositories::Selected,
//!         allowed_actions: None,
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::api::client::GitHubClient;
use crate::api::common::ApiError;

/// Which repositories in an organization are permitted to run Actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnabledRepositories {
    /// Actions enabled for every repository.
    All,
    /// Actions disabled organization-wide.
    None,
    /// Actions enabled for an explicitly selected set of repositories.
    Selected,
}

/// Which actions and reusable workflows runs may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedActions {
    /// Any action or reusable workflow.
    All,
    /// Only actions defined in the same organization/repository.
    LocalOnly,
    /// Only the selection described by [`SelectedActions`].
    Selected,
}

/// Organization-level Actions permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgActionsPermissions {
    /// The repository enablement policy.
    pub enabled_repositories: EnabledRepositories,

    /// The allowed-actions policy. Absent when every action is allowed.
    #[serde(default)]
    pub allowed_actions: Option<AllowedActions>,

    /// URL of the selected-actions resource, present when
    /// `allowed_actions` is `selected`.
    #[serde(default)]
    pub selected_actions_url: Option<String>,
}

/// Repository-level Actions permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoActionsPermissions {
    /// Whether Actions is enabled on the repository.
    pub enabled: bool,

    /// The allowed-actions policy. Absent when every action is allowed.
    #[serde(default)]
    pub allowed_actions: Option<AllowedActions>,

    /// URL of the selected-actions resource, present when
    /// `allowed_actions` is `selected`.
    #[serde(default)]
    pub selected_actions_url: Option<String>,
}

/// The concrete selection used when the allowed-actions policy is `selected`.
///
/// All fields default when absent, so a partially-populated response decodes
/// cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectedActions {
    /// Whether GitHub-owned actions (`actions/*`) are allowed.
    #[serde(default)]
    pub github_owned_allowed: bool,

    /// Whether actions from verified creators are allowed.
    #[serde(default)]
    pub verified_allowed: bool,

    /// Glob patterns of additionally allowed actions
    /// (e.g. `my-org/*`, `docker/build-push-action@*`).
    #[serde(default)]
    pub patterns_allowed: Vec<String>,
}

/// Update payload for organization-level permissions.
#[derive(Debug, Clone, Serialize)]
pub struct OrgPermissionsUpdate {
    /// The repository enablement policy to apply.
    pub enabled_repositories: EnabledRepositories,

    /// The allowed-actions policy to apply, if it should change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_actions: Option<AllowedActions>,
}

/// Update payload for repository-level permissions.
#[derive(Debug, Clone, Serialize)]
pub struct RepoPermissionsUpdate {
    /// Whether Actions should be enabled on the repository.
    pub enabled: bool,

    /// The allowed-actions policy to apply, if it should change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_actions: Option<AllowedActions>,
}

/// Endpoint manager for Actions permissions.
///
/// Obtained from [`GitHubClient::actions_permissions`].
pub struct ActionsPermissionsManager<'a> {
    client: &'a GitHubClient,
}

impl<'a> ActionsPermissionsManager<'a> {
    pub(crate) fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Gets the Actions permissions for an organization.
    ///
    /// `GET /orgs/{org}/actions/permissions`
    pub async fn get_for_org(&self, org: &str) -> Result<OrgActionsPermissions, ApiError> {
        self.client
            .get(&format!("/orgs/{org}/actions/permissions"))
            .await
    }

    /// Sets the Actions permissions for an organization.
    ///
    /// `PUT /orgs/{org}/actions/permissions` (204)
    pub async fn set_for_org(
        &self,
        org: &str,
        update: &OrgPermissionsUpdate,
    ) -> Result<(), ApiError> {
        self.client
            .put_unit(&format!("/orgs/{org}/actions/permissions"), update)
            .await
    }

    /// Gets the selected-actions policy for an organization.
    ///
    /// `GET /orgs/{org}/actions/permissions/selected-actions`
    pub async fn get_allowed_actions_for_org(
        &self,
        org: &str,
    ) -> Result<SelectedActions, ApiError> {
        self.client
            .get(&format!("/orgs/{org}/actions/permissions/selected-actions"))
            .await
    }

    /// Sets the selected-actions policy for an organization.
    ///
    /// `PUT /orgs/{org}/actions/permissions/selected-actions` (204)
    pub async fn set_allowed_actions_for_org(
        &self,
        org: &str,
        selection: &SelectedActions,
    ) -> Result<(), ApiError> {
        self.client
            .put_unit(
                &format!("/orgs/{org}/actions/permissions/selected-actions"),
                selection,
            )
            .await
    }

    /// Gets the Actions permissions for a repository.
    ///
    /// `GET /repos/{owner}/{repo}/actions/permissions`
    pub async fn get_for_repo(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<RepoActionsPermissions, ApiError> {
        self.client
            .get(&format!("/repos/{owner}/{repo}/actions/permissions"))
            .await
    }

    /// Sets the Actions permissions for a repository.
    ///
    /// `PUT /repos/{owner}/{repo}/actions/permissions` (204)
    pub async fn set_for_repo(
        &self,
        owner: &str,
        repo: &str,
        update: &RepoPermissionsUpdate,
    ) -> Result<(), ApiError> {
        self.client
            .put_unit(&format!("/repos/{owner}/{repo}/actions/permissions"), update)
            .await
    }

    /// Gets the selected-actions policy for a repository.
    ///
    /// `GET /repos/{owner}/{repo}/actions/permissions/selected-actions`
    pub async fn get_allowed_actions_for_repo(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<SelectedActions, ApiError> {
        self.client
            .get(&format!(
                "/repos/{owner}/{repo}/actions/permissions/selected-actions"
            ))
            .await
    }

    /// Sets the selected-actions policy for a repository.
    ///
    /// `PUT /repos/{owner}/{repo}/actions/permissions/selected-actions` (204)
    pub async fn set_allowed_actions_for_repo(
        &self,
        owner: &str,
        repo: &str,
        selection: &SelectedActions,
    ) -> Result<(), ApiError> {
        self.client
            .put_unit(
                &format!("/repos/{owner}/{repo}/actions/permissions/selected-actions"),
                selection,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_org_permissions_decode() {
        let json = r#"{
            "enabled_repositories": "selected",
            "allowed_actions": "local_only",
            "selected_actions_url": "https://api.github.com/orgs/my-org/actions/permissions/selected-actions"
        }"#;
        let perms: OrgActionsPermissions = serde_json::from_str(json).unwrap();
        assert_eq!(perms.enabled_repositories, EnabledRepositories::Selected);
        assert_eq!(perms.allowed_actions, Some(AllowedActions::LocalOnly));
    }

    #[test]
    fn test_optional_policy_absent_is_tolerated() {
        let json = r#"{"enabled_repositories": "all"}"#;
        let perms: OrgActionsPermissions = serde_json::from_str(json).unwrap();
        assert!(perms.allowed_actions.is_none());
        assert!(perms.selected_actions_url.is_none());
    }

    #[test]
    fn test_unknown_required_enum_value_fails() {
        let json = r#"{"enabled_repositories": "some_of_them"}"#;
        assert!(serde_json::from_str::<OrgActionsPermissions>(json).is_err());
    }

    #[test]
    fn test_selected_actions_defaults() {
        let selection: SelectedActions = serde_json::from_str("{}").unwrap();
        assert!(!selection.github_owned_allowed);
        assert!(!selection.verified_allowed);
        assert!(selection.patterns_allowed.is_empty());
    }

    #[test]
    fn test_update_skips_absent_policy() {
        let update = OrgPermissionsUpdate {
            enabled_repositories: EnabledRepositories::All,
            allowed_actions: None,
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"enabled_repositories":"all"}"#);
    }
}
