//
//  octorest
//  api/releases/mod.rs
//

//! Release API types and operations.
//!
//! Releases are tagged snapshots with optional attached assets. The model
//! covers the read surface (list, get, latest, by tag) and the write surface
//! (create, update, delete, asset deletion).
//!
//! # Example
//!
//! ```rust,no_run
//! use octorest::api::GitHubClient;
//! use octorest::api::releases::CreateRelease;
//! use octorest::config::ClientConfig;
//!
//! # async fn example() -> Result<(), octorest::api::ApiError> {
//! let client = GitHubClient::new(ClientConfig::from_env())?;
//! let release = client.releases()
//!     .create("octocat", "hello-world", &CreateRelease::for_tag("v1.0.0"))
//!     .await?;
//! println!("created release {}", release.id);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::client::GitHubClient;
use crate::api::common::{ApiError, ReactionRollup, SimpleUser};
use crate::api::query::Params;

/// Upload state of a release asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetState {
    /// The upload completed.
    Uploaded,
    /// The upload was started but never finished.
    Open,
}

/// A file attached to a release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAsset {
    /// Numeric asset id.
    pub id: u64,

    /// File name.
    pub name: String,

    /// Optional display label.
    #[serde(default)]
    pub label: Option<String>,

    /// Upload state.
    pub state: AssetState,

    /// MIME type of the file.
    #[serde(default)]
    pub content_type: Option<String>,

    /// Size in bytes.
    #[serde(default)]
    pub size: u64,

    /// Number of downloads.
    #[serde(default)]
    pub download_count: u64,

    /// Direct download URL.
    #[serde(default)]
    pub browser_download_url: Option<String>,

    /// The account that uploaded the asset.
    #[serde(default)]
    pub uploader: Option<SimpleUser>,

    /// When the asset was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the asset was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Numeric release id.
    pub id: u64,

    /// The git tag the release points at.
    pub tag_name: String,

    /// The commitish the tag was created from.
    #[serde(default)]
    pub target_commitish: Option<String>,

    /// Release title.
    #[serde(default)]
    pub name: Option<String>,

    /// Markdown release notes.
    #[serde(default)]
    pub body: Option<String>,

    /// Whether the release is an unpublished draft.
    #[serde(default)]
    pub draft: bool,

    /// Whether the release is marked as a prerelease.
    #[serde(default)]
    pub prerelease: bool,

    /// When the release object was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the release was published. Absent on drafts.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    /// The account that authored the release.
    #[serde(default)]
    pub author: Option<SimpleUser>,

    /// Attached assets, in API order. Absent decodes as empty.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,

    /// Web URL of the release page.
    #[serde(default)]
    pub html_url: Option<String>,

    /// Tarball download URL.
    #[serde(default)]
    pub tarball_url: Option<String>,

    /// Zipball download URL.
    #[serde(default)]
    pub zipball_url: Option<String>,

    /// Reaction counts, when anyone has reacted.
    #[serde(default)]
    pub reactions: Option<ReactionRollup>,
}

/// Payload for creating a release.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRelease {
    /// The tag to release. Created from `target_commitish` if it does not
    /// exist yet.
    pub tag_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,

    /// Ask the API to generate the notes from merged pull requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_release_notes: Option<bool>,
}

impl CreateRelease {
    /// A minimal create payload: tag name only.
    pub fn for_tag(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            target_commitish: None,
            name: None,
            body: None,
            draft: None,
            prerelease: None,
            generate_release_notes: None,
        }
    }
}

/// Payload for updating a release. Every field is optional.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRelease {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,
}

/// Endpoint manager for releases.
///
/// Obtained from [`GitHubClient::releases`].
pub struct ReleasesManager<'a> {
    client: &'a GitHubClient,
}

impl<'a> ReleasesManager<'a> {
    pub(crate) fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists the releases of a repository.
    ///
    /// `GET /repos/{owner}/{repo}/releases`
    pub async fn list(&self, owner: &str, repo: &str) -> Result<Vec<Release>, ApiError> {
        self.client
            .get(&format!("/repos/{owner}/{repo}/releases"))
            .await
    }

    /// Lists releases with pagination parameters.
    pub async fn list_with(
        &self,
        owner: &str,
        repo: &str,
        params: &Params,
    ) -> Result<Vec<Release>, ApiError> {
        self.client
            .get_with(&format!("/repos/{owner}/{repo}/releases"), params)
            .await
    }

    /// Gets a release by id.
    ///
    /// `GET /repos/{owner}/{repo}/releases/{release_id}`
    pub async fn get(&self, owner: &str, repo: &str, release_id: u64) -> Result<Release, ApiError> {
        self.client
            .get(&format!("/repos/{owner}/{repo}/releases/{release_id}"))
            .await
    }

    /// Gets the latest published full release.
    ///
    /// `GET /repos/{owner}/{repo}/releases/latest`
    pub async fn latest(&self, owner: &str, repo: &str) -> Result<Release, ApiError> {
        self.client
            .get(&format!("/repos/{owner}/{repo}/releases/latest"))
            .await
    }

    /// Gets a release by tag name.
    ///
    /// `GET /repos/{owner}/{repo}/releases/tags/{tag}`
    pub async fn by_tag(&self, owner: &str, repo: &str, tag: &str) -> Result<Release, ApiError> {
        self.client
            .get(&format!("/repos/{owner}/{repo}/releases/tags/{tag}"))
            .await
    }

    /// Creates a release.
    ///
    /// `POST /repos/{owner}/{repo}/releases` (201, echoes the entity)
    pub async fn create(
        &self,
        owner: &str,
        repo: &str,
        create: &CreateRelease,
    ) -> Result<Release, ApiError> {
        self.client
            .post(&format!("/repos/{owner}/{repo}/releases"), create)
            .await
    }

    /// Updates a release.
    ///
    /// `PATCH /repos/{owner}/{repo}/releases/{release_id}` (echoes the entity)
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        release_id: u64,
        update: &UpdateRelease,
    ) -> Result<Release, ApiError> {
        self.client
            .patch(
                &format!("/repos/{owner}/{repo}/releases/{release_id}"),
                update,
            )
            .await
    }

    /// Deletes a release. The tag is left in place.
    ///
    /// `DELETE /repos/{owner}/{repo}/releases/{release_id}` (204)
    pub async fn delete(&self, owner: &str, repo: &str, release_id: u64) -> Result<(), ApiError> {
        self.client
            .delete_unit(&format!("/repos/{owner}/{repo}/releases/{release_id}"))
            .await
    }

    /// Gets a single release asset.
    ///
    /// `GET /repos/{owner}/{repo}/releases/assets/{asset_id}`
    pub async fn get_asset(
        &self,
        owner: &str,
        repo: &str,
        asset_id: u64,
    ) -> Result<ReleaseAsset, ApiError> {
        self.client
            .get(&format!("/repos/{owner}/{repo}/releases/assets/{asset_id}"))
            .await
    }

    /// Deletes a release asset.
    ///
    /// `DELETE /repos/{owner}/{repo}/releases/assets/{asset_id}` (204)
    pub async fn delete_asset(
        &self,
        owner: &str,
        repo: &str,
        asset_id: u64,
    ) -> Result<(), ApiError> {
        self.client
            .delete_unit(&format!("/repos/{owner}/{repo}/releases/assets/{asset_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_decode_with_nested_reactions_and_assets() {
        let json = r#"{
            "id": 1,
            "tag_name": "v1.0.0",
            "target_commitish": "master",
            "name": "v1.0.0",
            "body": "Description of the release",
            "draft": false,
            "prerelease": false,
            "created_at": "2013-02-27T19:35:32Z",
            "published_at": "2013-02-27T19:35:32Z",
            "author": {"id": 1, "login": "octocat"},
            "assets": [
                {"id": 1, "name": "example.zip", "state": "uploaded", "size": 1024},
                {"id": 2, "name": "example.tar.gz", "state": "open"}
            ],
            "reactions": {"total_count": 4, "+1": 3, "-1": 1}
        }"#;
        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.tag_name, "v1.0.0");
        assert_eq!(release.assets.len(), 2);
        assert_eq!(release.assets[0].state, AssetState::Uploaded);
        assert_eq!(release.assets[1].state, AssetState::Open);
        assert_eq!(release.assets[1].size, 0);
        let reactions = release.reactions.unwrap();
        assert_eq!(reactions.plus_one, 3);
        assert_eq!(reactions.minus_one, 1);
    }

    #[test]
    fn test_draft_release_minimal_decode() {
        let json = r#"{"id": 2, "tag_name": "v2.0.0", "draft": true}"#;
        let release: Release = serde_json::from_str(json).unwrap();
        assert!(release.draft);
        assert!(release.published_at.is_none());
        assert!(release.assets.is_empty());
        assert!(release.reactions.is_none());
    }

    #[test]
    fn test_create_release_minimal_serialization() {
        let create = CreateRelease::for_tag("v1.0.0");
        assert_eq!(
            serde_json::to_string(&create).unwrap(),
            r#"{"tag_name":"v1.0.0"}"#
        );
    }

    #[test]
    fn test_typed_and_json_views_agree() {
        // The typed model must be derivable from the generic JSON view.
        let raw = r#"{"id": 3, "tag_name": "v3.0.0", "draft": false, "prerelease": true}"#;
        let typed: Release = serde_json::from_str(raw).unwrap();
        let json: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(typed.id, json["id"].as_u64().unwrap());
        assert_eq!(typed.tag_name, json["tag_name"].as_str().unwrap());
        assert_eq!(typed.prerelease, json["prerelease"].as_bool().unwrap());
    }
}
