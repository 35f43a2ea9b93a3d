//! Version history reading.
//!
//! History is whatever the backend says it is: an ordered, newest-first
//! list of commits touching a path. Versions are recovered from commit
//! messages entry by entry; commits without a marker (manual writes,
//! foreign tooling) are part of the history but not of the version list.

use strata_core::{ConfigKey, extract_version};

use super::{ConfigStore, ConfigVersion, VersionPage};
use crate::error::StoreError;
use crate::provider::CommitInfo;

/// Smallest accepted page size.
const MIN_LIMIT: usize = 1;

/// Largest accepted page size.
const MAX_LIMIT: usize = 100;

/// Offset-based pagination over the newest-first history list.
///
/// `skip` is unsigned, so negative offsets are unrepresentable; `limit` is
/// checked against `[1, 100]` before any backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: usize,
    pub limit: usize,
}

impl Pagination {
    /// Default page: first ten entries.
    pub const DEFAULT: Pagination = Pagination { skip: 0, limit: 10 };

    /// Validates the page bounds.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.limit < MIN_LIMIT || self.limit > MAX_LIMIT {
            return Err(StoreError::InvalidPagination(format!(
                "limit must be between {MIN_LIMIT} and {MAX_LIMIT}, got {}",
                self.limit
            )));
        }
        Ok(())
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ConfigStore {
    /// Lists a page of a config's version history.
    ///
    /// `total` counts every commit touching the path, including commits
    /// without a recoverable version; `versions` holds only the entries in
    /// the requested window that decoded cleanly and carried a version
    /// marker. An entry that fails to fetch or decode is logged and
    /// dropped; it never fails the page.
    pub async fn list_versions(
        &self,
        key: &ConfigKey,
        page: Pagination,
    ) -> Result<VersionPage, StoreError> {
        page.validate()?;

        // The config must currently exist for its history to be listable.
        self.provider().get_file(&key.path(), key.branch()).await?;

        let commits = self.provider().list_commits(&key.path(), key.branch()).await?;
        let total = commits.len();

        let mut versions = Vec::new();
        for commit in commits.iter().skip(page.skip).take(page.limit) {
            match self.version_entry(key, commit).await {
                Ok(Some(entry)) => versions.push(entry),
                Ok(None) => {}
                Err(err) => {
                    tracing::error!(
                        commit = %commit.sha,
                        path = %key.path(),
                        error = %err,
                        "failed to process version entry, dropping it"
                    );
                }
            }
        }

        Ok(VersionPage {
            total,
            skip: page.skip,
            limit: page.limit,
            versions,
        })
    }

    /// Decodes one history entry, or `None` when the commit carries no
    /// version marker.
    async fn version_entry(
        &self,
        key: &ConfigKey,
        commit: &CommitInfo,
    ) -> Result<Option<ConfigVersion>, StoreError> {
        let Some(version) = extract_version(&commit.message) else {
            return Ok(None);
        };

        let snapshot = self.provider().get_file(&key.path(), &commit.sha).await?;
        let content = key.format().decode(&snapshot.content)?;

        Ok(Some(ConfigVersion {
            version,
            commit_sha: commit.sha.clone(),
            commit_message: commit.message.clone(),
            author: commit.author.clone(),
            date: commit.date,
            content,
        }))
    }
}

/// Derives the next version number from a newest-first commit list.
///
/// Only the single most recent entry with a positive version tag is
/// consulted; everything older is irrelevant, even if it carries a higher
/// number. With no taggable entry at all, numbering starts at 1. Zero tags
/// are treated as untaggable and skipped.
pub(crate) fn next_version_from(commits: &[CommitInfo]) -> u64 {
    commits
        .iter()
        .find_map(|commit| extract_version(&commit.message).filter(|v| *v > 0))
        .map(|latest| latest + 1)
        .unwrap_or(1)
}
