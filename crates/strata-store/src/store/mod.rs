//! The version store.
//!
//! [`ConfigStore`] is the policy layer on top of a [`RepoProvider`]: it
//! decides paths, commit messages, and version numbers, and delegates every
//! durable effect to the provider. It owns no persistent state of its own;
//! each request works on a transient decoded view of the backend's history.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use strata_core::{ConfigDocument, ConfigKey, Project};

use crate::error::StoreError;
use crate::provider::{EntryKind, RepoProvider};

mod history;
mod writer;

pub use history::Pagination;
pub use writer::{RecoverOutcome, WriteOutcome};

/// One decoded entry of a config's version history.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigVersion {
    /// Version number recovered from the commit message.
    pub version: u64,
    /// Commit that produced this version.
    pub commit_sha: String,
    /// Full commit message, marker included.
    pub commit_message: String,
    /// Commit author.
    pub author: String,
    /// Commit timestamp.
    pub date: DateTime<Utc>,
    /// Decoded content as of this version.
    pub content: ConfigDocument,
}

/// A paginated slice of version history.
#[derive(Debug, Clone, Serialize)]
pub struct VersionPage {
    /// Count of all history entries for the path, taggable or not.
    pub total: usize,
    /// Offset this page was requested at.
    pub skip: usize,
    /// Page size this page was requested with.
    pub limit: usize,
    /// Entries in the window that carried a recoverable version.
    pub versions: Vec<ConfigVersion>,
}

/// A config file discovered in a project listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigInfo {
    /// Config name (file stem).
    pub name: String,
    /// Raw extension as found in the repository, not validated against the
    /// supported set.
    pub format: String,
    /// Full backend path.
    pub path: String,
}

/// The version store engine.
pub struct ConfigStore {
    provider: Arc<dyn RepoProvider>,
}

impl ConfigStore {
    /// Creates a store over the given repository backend.
    pub fn new(provider: Arc<dyn RepoProvider>) -> Self {
        Self { provider }
    }

    /// Returns the underlying provider.
    pub fn provider(&self) -> &dyn RepoProvider {
        self.provider.as_ref()
    }

    /// Reads and decodes the latest content of a config.
    pub async fn read(&self, key: &ConfigKey) -> Result<ConfigDocument, StoreError> {
        let file = self.provider.get_file(&key.path(), key.branch()).await?;
        Ok(key.format().decode(&file.content)?)
    }

    /// Lists every config file in a project.
    ///
    /// Every file is reported with whatever extension it has; files that
    /// are not decodable configs still show up here.
    pub async fn list_configs(&self, project: &Project) -> Result<Vec<ConfigInfo>, StoreError> {
        let entries = self
            .provider
            .list_directory(project.as_str(), project.as_str())
            .await?;

        Ok(entries
            .into_iter()
            .filter(|entry| entry.kind == EntryKind::File)
            .map(|entry| {
                let (name, format) = split_config_name(&entry.name);
                ConfigInfo {
                    name,
                    format,
                    path: entry.path,
                }
            })
            .collect())
    }
}

/// Splits a file name into stem and extension. Names without an extension
/// (or dotfiles like `.hidden`) keep their full name and get an empty
/// format.
fn split_config_name(file_name: &str) -> (String, String) {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), ext.to_string()),
        _ => (file_name.to_string(), String::new()),
    }
}
