//! Version writing and recovery.
//!
//! Every mutation is a single backend commit: the store computes the next
//! version number, tags the commit message, and hands the write to the
//! provider with a freshly fetched precondition token. The backend is the
//! sole arbiter of concurrent writers; a lost race surfaces as a conflict
//! and is never retried here.

use strata_core::{ConfigDocument, ConfigKey, tag_message};
use tracing::instrument;

use super::ConfigStore;
use super::history::next_version_from;
use crate::error::StoreError;

/// Version assigned to every freshly created config.
const FIRST_VERSION: u64 = 1;

/// Result of a create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Version number recorded in the commit message.
    pub version: u64,
    /// Sha of the commit that carried the write.
    pub commit_sha: String,
}

/// Result of a recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoverOutcome {
    /// The version that was restored.
    pub original_version: u64,
    /// The new version the restored content was written as.
    pub new_version: u64,
    /// Sha of the commit that carried the restore.
    pub commit_sha: String,
}

impl ConfigStore {
    /// Creates a new config. The first write of a path is version 1 by
    /// construction; an existing path fails with
    /// [`StoreError::AlreadyExists`].
    #[instrument(skip_all, fields(path = %key.path()))]
    pub async fn create(
        &self,
        key: &ConfigKey,
        document: &ConfigDocument,
        message: Option<String>,
    ) -> Result<WriteOutcome, StoreError> {
        let content = key.format().encode(document)?;
        let base = message.unwrap_or_else(|| format!("Create configuration '{}'", key.name()));
        let tagged = tag_message(&base, FIRST_VERSION);

        let commit_sha = self
            .provider()
            .create_file(&key.path(), key.branch(), &tagged, &content)
            .await?;

        tracing::info!(version = FIRST_VERSION, commit = %commit_sha, "config created");
        Ok(WriteOutcome {
            version: FIRST_VERSION,
            commit_sha,
        })
    }

    /// Updates an existing config.
    ///
    /// The precondition token is fetched immediately before the write,
    /// never cached; the next version is one past the most recent tagged
    /// history entry.
    #[instrument(skip_all, fields(path = %key.path()))]
    pub async fn update(
        &self,
        key: &ConfigKey,
        document: &ConfigDocument,
        message: Option<String>,
    ) -> Result<WriteOutcome, StoreError> {
        let current = self.provider().get_file(&key.path(), key.branch()).await?;
        let content = key.format().encode(document)?;

        let commits = self.provider().list_commits(&key.path(), key.branch()).await?;
        let next_version = next_version_from(&commits);

        let base = message.unwrap_or_else(|| format!("Update configuration '{}'", key.name()));
        let tagged = tag_message(&base, next_version);

        let commit_sha = self
            .provider()
            .update_file(&key.path(), key.branch(), &tagged, &content, &current.sha)
            .await?;

        tracing::info!(version = next_version, commit = %commit_sha, "config updated");
        Ok(WriteOutcome {
            version: next_version,
            commit_sha,
        })
    }

    /// Deletes a config.
    ///
    /// The deletion commit carries no version marker: deletion is terminal
    /// for the path, and a later re-creation restarts numbering at 1.
    #[instrument(skip_all, fields(path = %key.path()))]
    pub async fn delete(&self, key: &ConfigKey, message: Option<String>) -> Result<(), StoreError> {
        let current = self.provider().get_file(&key.path(), key.branch()).await?;
        let base = message.unwrap_or_else(|| format!("Delete configuration '{}'", key.name()));

        self.provider()
            .delete_file(&key.path(), key.branch(), &base, &current.sha)
            .await?;

        tracing::info!("config deleted");
        Ok(())
    }

    /// Restores a previous version as a new write.
    ///
    /// Scans the whole history for the first entry tagged with `version`
    /// and writes that snapshot's raw text back unchanged, tagged with the
    /// next sequential number. Restoring never rewrites history and never
    /// decrements the counter; when no entry matches, nothing is written.
    #[instrument(skip_all, fields(path = %key.path(), version))]
    pub async fn recover(
        &self,
        key: &ConfigKey,
        version: u64,
        message: Option<String>,
    ) -> Result<RecoverOutcome, StoreError> {
        let commits = self.provider().list_commits(&key.path(), key.branch()).await?;

        let target = commits
            .iter()
            .find(|commit| strata_core::extract_version(&commit.message) == Some(version))
            .ok_or(StoreError::VersionNotFound(version))?;

        // The historical text is reused byte-for-byte; decoding and
        // re-encoding could drift formatting.
        let snapshot = self.provider().get_file(&key.path(), &target.sha).await?;
        let current = self.provider().get_file(&key.path(), key.branch()).await?;
        let next_version = next_version_from(&commits);

        let base = message.unwrap_or_else(|| {
            format!("Restore configuration '{}' to version {version}", key.name())
        });
        let tagged = tag_message(&base, next_version);

        let commit_sha = self
            .provider()
            .update_file(
                &key.path(),
                key.branch(),
                &tagged,
                &snapshot.content,
                &current.sha,
            )
            .await?;

        tracing::info!(
            original = version,
            new = next_version,
            commit = %commit_sha,
            "config restored"
        );
        Ok(RecoverOutcome {
            original_version: version,
            new_version: next_version,
            commit_sha,
        })
    }
}
