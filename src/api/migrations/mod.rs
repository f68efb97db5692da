//
//  octorest
//  api/migrations/mod.rs
//

//! Organization migration API types and operations.
//!
//! A migration exports a set of repositories into a downloadable archive.
//! The lifecycle is `pending -> exporting -> exported`, with `failed` as the
//! terminal error state; callers poll [`MigrationsManager::status`] until
//! the state settles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::client::GitHubClient;
use crate::api::common::{ApiError, MinimalRepository, SimpleUser};
use crate::api::query::Params;

/// Lifecycle state of a migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationState {
    /// Queued, not yet started.
    Pending,
    /// Export in progress.
    Exporting,
    /// Archive ready for download.
    Exported,
    /// Export failed.
    Failed,
}

/// An organization migration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Migration {
    /// Numeric migration id.
    pub id: u64,

    /// Opaque migration GUID.
    #[serde(default)]
    pub guid: Option<String>,

    /// Current lifecycle state.
    pub state: MigrationState,

    /// Whether the exported repositories were locked.
    #[serde(default)]
    pub lock_repositories: bool,

    /// Whether attachments were excluded from the archive.
    #[serde(default)]
    pub exclude_attachments: bool,

    /// The repositories included in the export, in API order.
    #[serde(default)]
    pub repositories: Vec<MinimalRepository>,

    /// The organization the migration belongs to.
    #[serde(default)]
    pub owner: Option<SimpleUser>,

    /// When the migration was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the migration state last changed.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// API URL of this migration.
    #[serde(default)]
    pub url: Option<String>,

    /// URL of the archive, present once `state` is `exported`.
    #[serde(default)]
    pub archive_url: Option<String>,
}

/// Payload for starting a migration.
#[derive(Debug, Clone, Serialize)]
pub struct StartMigration {
    /// Repository names (`name` or `owner/name`) to export.
    pub repositories: Vec<String>,

    /// Lock the repositories for the duration of the export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_repositories: Option<bool>,

    /// Leave attachments out of the archive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_attachments: Option<bool>,
}

impl StartMigration {
    /// Starts an unlocked export of the given repositories.
    pub fn of(repositories: Vec<String>) -> Self {
        Self {
            repositories,
            lock_repositories: None,
            exclude_attachments: None,
        }
    }
}

/// Endpoint manager for organization migrations.
///
/// Obtained from [`GitHubClient::migrations`].
pub struct MigrationsManager<'a> {
    client: &'a GitHubClient,
}

impl<'a> MigrationsManager<'a> {
    pub(crate) fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Starts a migration.
    ///
    /// `POST /orgs/{org}/migrations` (201, echoes the entity)
    pub async fn start(&self, org: &str, start: &StartMigration) -> Result<Migration, ApiError> {
        self.client
            .post(&format!("/orgs/{org}/migrations"), start)
            .await
    }

    /// Lists an organization's migrations, most recent first.
    ///
    /// `GET /orgs/{org}/migrations`
    pub async fn list(&self, org: &str) -> Result<Vec<Migration>, ApiError> {
        self.client.get(&format!("/orgs/{org}/migrations")).await
    }

    /// Lists migrations with pagination parameters.
    pub async fn list_with(&self, org: &str, params: &Params) -> Result<Vec<Migration>, ApiError> {
        self.client
            .get_with(&format!("/orgs/{org}/migrations"), params)
            .await
    }

    /// Gets the current status of a migration.
    ///
    /// `GET /orgs/{org}/migrations/{migration_id}`
    pub async fn status(&self, org: &str, migration_id: u64) -> Result<Migration, ApiError> {
        self.client
            .get(&format!("/orgs/{org}/migrations/{migration_id}"))
            .await
    }

    /// Deletes a migration archive.
    ///
    /// `DELETE /orgs/{org}/migrations/{migration_id}/archive` (204)
    pub async fn delete_archive(&self, org: &str, migration_id: u64) -> Result<(), ApiError> {
        self.client
            .delete_unit(&format!("/orgs/{org}/migrations/{migration_id}/archive"))
            .await
    }

    /// Unlocks a repository that was locked for export.
    ///
    /// `DELETE /orgs/{org}/migrations/{migration_id}/repos/{repo_name}/lock` (204)
    pub async fn unlock_repository(
        &self,
        org: &str,
        migration_id: u64,
        repo_name: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete_unit(&format!(
                "/orgs/{org}/migrations/{migration_id}/repos/{repo_name}/lock"
            ))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::snapshot::parse_enum;

    #[test]
    fn test_migration_decode() {
        let json = r#"{
            "id": 79,
            "guid": "0b989ba4-242f-11e5-81e1-c7b6966d2516",
            "state": "exported",
            "lock_repositories": true,
            "repositories": [
                {"id": 1296269, "name": "Hello-World", "full_name": "octo-org/Hello-World"}
            ],
            "owner": {"id": 1, "login": "octo-org"},
            "created_at": "2015-07-06T15:33:38-07:00",
            "updated_at": "2015-07-06T15:33:38-07:00",
            "archive_url": "https://api.github.com/orgs/octo-org/migrations/79/archive"
        }"#;
        let migration: Migration = serde_json::from_str(json).unwrap();
        assert_eq!(migration.state, MigrationState::Exported);
        assert!(migration.lock_repositories);
        assert_eq!(migration.repositories[0].full_name, "octo-org/Hello-World");
        assert!(migration.archive_url.is_some());
    }

    #[test]
    fn test_state_coercion() {
        assert_eq!(
            parse_enum::<MigrationState>("exported").unwrap(),
            MigrationState::Exported
        );
        assert!(parse_enum::<MigrationState>("bogus").is_err());
    }

    #[test]
    fn test_pending_migration_minimal_decode() {
        let json = r#"{"id": 80, "state": "pending"}"#;
        let migration: Migration = serde_json::from_str(json).unwrap();
        assert_eq!(migration.state, MigrationState::Pending);
        assert!(migration.repositories.is_empty());
        assert!(!migration.lock_repositories);
        assert!(migration.archive_url.is_none());
    }

    #[test]
    fn test_start_migration_serialization() {
        let start = StartMigration::of(vec!["octo-org/Hello-World".to_string()]);
        assert_eq!(
            serde_json::to_string(&start).unwrap(),
            r#"{"repositories":["octo-org/Hello-World"]}"#
        );
    }
}
