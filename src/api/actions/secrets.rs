//
//  octorest
//  api/actions/secrets.rs
//

//! Actions secrets API types and operations.
//!
//! Secrets are write-only from the API's perspective: list and get
//! operations return metadata (name, timestamps, visibility) but never the
//! value. Creating or updating a secret requires the value to be encrypted
//! client-side against the repository or organization public key; this
//! library transports the `encrypted_value` and `key_id` but does not
//! perform the sealed-box encryption itself.
//!
//! # Notes
//!
//! - List responses carry a `total_count` that reflects the full collection,
//!   not the returned page — the two may diverge
//! - Put operations answer 201 (created) or 204 (updated); both are success

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::client::GitHubClient;
use crate::api::common::{ApiError, MinimalRepository};
use crate::api::query::Params;

/// Visibility of an organization secret across repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Visible to all repositories in the organization.
    All,
    /// Visible only to private repositories.
    Private,
    /// Visible to an explicitly selected set of repositories.
    Selected,
}

/// An organization-level Actions secret (metadata only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgSecret {
    /// Secret name (e.g. `DEPLOY_TOKEN`).
    pub name: String,

    /// When the secret was created.
    pub created_at: DateTime<Utc>,

    /// When the secret value was last updated.
    pub updated_at: DateTime<Utc>,

    /// Which repositories can see the secret.
    pub visibility: Visibility,

    /// URL of the selected-repositories resource, present when
    /// `visibility` is `selected`.
    #[serde(default)]
    pub selected_repositories_url: Option<String>,
}

/// A repository-level Actions secret (metadata only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSecret {
    /// Secret name.
    pub name: String,

    /// When the secret was created.
    pub created_at: DateTime<Utc>,

    /// When the secret value was last updated.
    pub updated_at: DateTime<Utc>,
}

/// List wrapper for organization secrets.
///
/// `total_count` is the size of the whole collection as reported by the API;
/// `secrets.len()` is the size of this page. Callers must not assume the two
/// are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgSecrets {
    /// Reported size of the full collection.
    pub total_count: u64,

    /// The secrets on this page, in API order.
    pub secrets: Vec<OrgSecret>,
}

/// List wrapper for repository secrets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSecrets {
    /// Reported size of the full collection.
    pub total_count: u64,

    /// The secrets on this page, in API order.
    pub secrets: Vec<RepoSecret>,
}

/// A public key used to encrypt secret values before upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKey {
    /// Identifier to send back as `key_id` alongside the encrypted value.
    pub key_id: String,

    /// Base64-encoded libsodium public key.
    pub key: String,
}

/// Payload for creating or updating a secret.
///
/// The caller supplies `encrypted_value` already sealed against the
/// [`PublicKey`] of the target scope.
#[derive(Debug, Clone, Serialize)]
pub struct SecretUpdate {
    /// The sealed-box-encrypted secret value, base64-encoded.
    pub encrypted_value: String,

    /// The `key_id` of the public key the value was encrypted against.
    pub key_id: String,

    /// Visibility (organization secrets only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,

    /// Repository ids the secret is visible to, when `visibility` is
    /// `selected` (organization secrets only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_repository_ids: Option<Vec<u64>>,
}

/// List wrapper for the repositories an organization secret is visible to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedRepositories {
    /// Reported size of the full collection.
    pub total_count: u64,

    /// The repositories on this page, in API order.
    pub repositories: Vec<MinimalRepository>,
}

#[derive(Serialize)]
struct SetSelectedRepositories<'a> {
    selected_repository_ids: &'a [u64],
}

/// Endpoint manager for Actions secrets.
///
/// Obtained from [`GitHubClient::secrets`].
pub struct SecretsManager<'a> {
    client: &'a GitHubClient,
}

impl<'a> SecretsManager<'a> {
    pub(crate) fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    // --- organization scope ------------------------------------------------

    /// Lists organization secrets.
    ///
    /// `GET /orgs/{org}/actions/secrets`
    pub async fn list_for_org(&self, org: &str) -> Result<OrgSecrets, ApiError> {
        self.client
            .get(&format!("/orgs/{org}/actions/secrets"))
            .await
    }

    /// Lists organization secrets with pagination parameters.
    pub async fn list_for_org_with(
        &self,
        org: &str,
        params: &Params,
    ) -> Result<OrgSecrets, ApiError> {
        self.client
            .get_with(&format!("/orgs/{org}/actions/secrets"), params)
            .await
    }

    /// Gets one organization secret's metadata.
    ///
    /// `GET /orgs/{org}/actions/secrets/{name}`
    pub async fn get_org_secret(&self, org: &str, name: &str) -> Result<OrgSecret, ApiError> {
        self.client
            .get(&format!("/orgs/{org}/actions/secrets/{name}"))
            .await
    }

    /// Creates or updates an organization secret.
    ///
    /// `PUT /orgs/{org}/actions/secrets/{name}` (201 created / 204 updated)
    pub async fn put_org_secret(
        &self,
        org: &str,
        name: &str,
        update: &SecretUpdate,
    ) -> Result<(), ApiError> {
        self.client
            .put_unit(&format!("/orgs/{org}/actions/secrets/{name}"), update)
            .await
    }

    /// Deletes an organization secret.
    ///
    /// `DELETE /orgs/{org}/actions/secrets/{name}` (204)
    pub async fn delete_org_secret(&self, org: &str, name: &str) -> Result<(), ApiError> {
        self.client
            .delete_unit(&format!("/orgs/{org}/actions/secrets/{name}"))
            .await
    }

    /// Gets the organization public key used to encrypt secret values.
    ///
    /// `GET /orgs/{org}/actions/secrets/public-key`
    pub async fn org_public_key(&self, org: &str) -> Result<PublicKey, ApiError> {
        self.client
            .get(&format!("/orgs/{org}/actions/secrets/public-key"))
            .await
    }

    /// Lists the repositories a `selected`-visibility secret is shared with.
    ///
    /// `GET /orgs/{org}/actions/secrets/{name}/repositories`
    pub async fn list_selected_repositories(
        &self,
        org: &str,
        name: &str,
    ) -> Result<SelectedRepositories, ApiError> {
        self.client
            .get(&format!("/orgs/{org}/actions/secrets/{name}/repositories"))
            .await
    }

    /// Replaces the repository selection of a `selected`-visibility secret.
    ///
    /// `PUT /orgs/{org}/actions/secrets/{name}/repositories` (204)
    pub async fn set_selected_repositories(
        &self,
        org: &str,
        name: &str,
        repository_ids: &[u64],
    ) -> Result<(), ApiError> {
        self.client
            .put_unit(
                &format!("/orgs/{org}/actions/secrets/{name}/repositories"),
                &SetSelectedRepositories {
                    selected_repository_ids: repository_ids,
                },
            )
            .await
    }

    // --- repository scope --------------------------------------------------

    /// Lists repository secrets.
    ///
    /// `GET /repos/{owner}/{repo}/actions/secrets`
    pub async fn list_for_repo(&self, owner: &str, repo: &str) -> Result<RepoSecrets, ApiError> {
        self.client
            .get(&format!("/repos/{owner}/{repo}/actions/secrets"))
            .await
    }

    /// Lists repository secrets with pagination parameters.
    pub async fn list_for_repo_with(
        &self,
        owner: &str,
        repo: &str,
        params: &Params,
    ) -> Result<RepoSecrets, ApiError> {
        self.client
            .get_with(&format!("/repos/{owner}/{repo}/actions/secrets"), params)
            .await
    }

    /// Gets one repository secret's metadata.
    ///
    /// `GET /repos/{owner}/{repo}/actions/secrets/{name}`
    pub async fn get_repo_secret(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
    ) -> Result<RepoSecret, ApiError> {
        self.client
            .get(&format!("/repos/{owner}/{repo}/actions/secrets/{name}"))
            .await
    }

    /// Creates or updates a repository secret.
    ///
    /// `PUT /repos/{owner}/{repo}/actions/secrets/{name}` (201/204)
    pub async fn put_repo_secret(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        update: &SecretUpdate,
    ) -> Result<(), ApiError> {
        self.client
            .put_unit(
                &format!("/repos/{owner}/{repo}/actions/secrets/{name}"),
                update,
            )
            .await
    }

    /// Deletes a repository secret.
    ///
    /// `DELETE /repos/{owner}/{repo}/actions/secrets/{name}` (204)
    pub async fn delete_repo_secret(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete_unit(&format!("/repos/{owner}/{repo}/actions/secrets/{name}"))
            .await
    }

    /// Gets the repository public key used to encrypt secret values.
    ///
    /// `GET /repos/{owner}/{repo}/actions/secrets/public-key`
    pub async fn repo_public_key(&self, owner: &str, repo: &str) -> Result<PublicKey, ApiError> {
        self.client
            .get(&format!("/repos/{owner}/{repo}/actions/secrets/public-key"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_count_may_diverge_from_page_length() {
        // The API reports the collection size, not the page size.
        let json = r#"{
            "total_count": 5,
            "secrets": [
                {"name": "A", "created_at": "2020-01-10T14:59:22Z", "updated_at": "2020-01-10T14:59:22Z", "visibility": "all"},
                {"name": "B", "created_at": "2020-01-10T14:59:22Z", "updated_at": "2020-01-11T11:59:22Z", "visibility": "private"},
                {"name": "C", "created_at": "2020-01-10T14:59:22Z", "updated_at": "2020-01-10T14:59:22Z", "visibility": "selected"}
            ]
        }"#;
        let secrets: OrgSecrets = serde_json::from_str(json).unwrap();
        assert_eq!(secrets.total_count, 5);
        assert_eq!(secrets.secrets.len(), 3);
        // Element order matches the source array.
        assert_eq!(secrets.secrets[0].name, "A");
        assert_eq!(secrets.secrets[2].name, "C");
    }

    #[test]
    fn test_decoded_secrets_survive_reencoding() {
        // Serializing a decoded model and decoding it again must reproduce
        // the scalar fields, so renames and defaults stay symmetric.
        let json = r#"{
            "total_count": 2,
            "secrets": [
                {"name": "GH_TOKEN", "created_at": "2019-08-10T14:59:22Z", "updated_at": "2020-01-10T14:59:22Z", "visibility": "private"},
                {"name": "GIST_ID", "created_at": "2020-01-10T10:59:22Z", "updated_at": "2020-01-11T11:59:22Z", "visibility": "selected"}
            ]
        }"#;
        let decoded: OrgSecrets = serde_json::from_str(json).unwrap();
        let reencoded = serde_json::to_value(&decoded).unwrap();
        let redecoded: OrgSecrets = serde_json::from_value(reencoded).unwrap();

        assert_eq!(redecoded.total_count, decoded.total_count);
        assert_eq!(redecoded.secrets.len(), decoded.secrets.len());
        for (a, b) in decoded.secrets.iter().zip(&redecoded.secrets) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.visibility, b.visibility);
            assert_eq!(a.created_at, b.created_at);
            assert_eq!(a.updated_at, b.updated_at);
        }
    }

    #[test]
    fn test_visibility_enum_is_strict() {
        let json = r#"{"name": "A", "created_at": "2020-01-10T14:59:22Z", "updated_at": "2020-01-10T14:59:22Z", "visibility": "everyone"}"#;
        assert!(serde_json::from_str::<OrgSecret>(json).is_err());
    }

    #[test]
    fn test_secret_update_serialization() {
        let update = SecretUpdate {
            encrypted_value: "c2VhbGVk".to_string(),
            key_id: "568250167242549743".to_string(),
            visibility: Some(Visibility::Selected),
            selected_repository_ids: Some(vec![1296269]),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["visibility"], "selected");
        assert_eq!(json["selected_repository_ids"][0], 1296269);

        let minimal = SecretUpdate {
            encrypted_value: "c2VhbGVk".to_string(),
            key_id: "1".to_string(),
            visibility: None,
            selected_repository_ids: None,
        };
        let json = serde_json::to_string(&minimal).unwrap();
        assert!(!json.contains("visibility"));
    }
}
