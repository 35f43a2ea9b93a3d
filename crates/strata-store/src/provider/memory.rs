//! In-memory repository backend.
//!
//! Simulates a hosting provider faithfully enough to exercise the whole
//! version engine without a network: per-branch file maps, an append-only
//! commit log with content snapshots, deterministic shas, and the same
//! existence and precondition semantics as the real backend. Used by the
//! test suites and handy for local development.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;

use async_trait::async_trait;

use super::{CommitInfo, EntryKind, RepoEntry, RepoFile, RepoProvider};
use crate::error::ProviderError;

/// Commit author reported by this provider.
const AUTHOR: &str = "memory-provider";

#[derive(Debug, Default)]
struct Branch {
    /// Current head state of each path.
    files: HashMap<String, FileRecord>,
    /// Append-only log, oldest first. Listings reverse it.
    commits: Vec<CommitRecord>,
}

#[derive(Debug, Clone)]
struct FileRecord {
    content: String,
    sha: String,
}

#[derive(Debug, Clone)]
struct CommitRecord {
    sha: String,
    path: String,
    message: String,
    date: DateTime<Utc>,
    /// Content of the path as of this commit; `None` for deletions.
    snapshot: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    branches: HashMap<String, Branch>,
    counter: u64,
}

impl State {
    fn next_sha(&mut self, kind: &str) -> String {
        self.counter += 1;
        format!("{kind}-{:06x}", self.counter)
    }

    fn branch_mut(&mut self, branch: &str) -> Result<&mut Branch, ProviderError> {
        self.branches
            .get_mut(branch)
            .ok_or_else(|| ProviderError::NotFound(format!("branch '{branch}' not found")))
    }
}

/// An in-memory [`RepoProvider`].
#[derive(Debug, Default)]
pub struct MemoryProvider {
    state: Mutex<State>,
}

impl MemoryProvider {
    /// Creates an empty provider with no branches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider with the given branches already present.
    pub fn with_branches<I, S>(branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new();
        {
            let mut state = provider.state.lock();
            for branch in branches {
                state.branches.entry(branch.into()).or_default();
            }
        }
        provider
    }

    /// Adds a branch if it does not exist yet.
    pub fn create_branch(&self, branch: impl Into<String>) {
        self.state.lock().branches.entry(branch.into()).or_default();
    }

    /// Number of commits recorded on a branch, across all paths.
    pub fn commit_count(&self, branch: &str) -> usize {
        self.state
            .lock()
            .branches
            .get(branch)
            .map(|b| b.commits.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl RepoProvider for MemoryProvider {
    async fn get_file(&self, path: &str, reference: &str) -> Result<RepoFile, ProviderError> {
        let state = self.state.lock();

        // Branch head lookup first; otherwise treat the reference as a
        // commit sha and serve the snapshot recorded at that commit.
        if let Some(branch) = state.branches.get(reference) {
            return branch
                .files
                .get(path)
                .map(|record| RepoFile {
                    content: record.content.clone(),
                    sha: record.sha.clone(),
                })
                .ok_or_else(|| ProviderError::NotFound(format!("'{path}' not found on '{reference}'")));
        }

        for branch in state.branches.values() {
            if let Some(commit) = branch
                .commits
                .iter()
                .find(|c| c.sha == reference && c.path == path)
            {
                let content = commit.snapshot.clone().ok_or_else(|| {
                    ProviderError::NotFound(format!("'{path}' was deleted in {reference}"))
                })?;
                return Ok(RepoFile {
                    content,
                    sha: commit.sha.clone(),
                });
            }
        }

        Err(ProviderError::NotFound(format!(
            "reference '{reference}' not found"
        )))
    }

    async fn create_file(
        &self,
        path: &str,
        branch: &str,
        message: &str,
        content: &str,
    ) -> Result<String, ProviderError> {
        let mut state = self.state.lock();
        let file_sha = state.next_sha("blob");
        let commit_sha = state.next_sha("commit");

        let branch = state.branch_mut(branch)?;
        if branch.files.contains_key(path) {
            return Err(ProviderError::AlreadyExists(format!(
                "'{path}' already exists"
            )));
        }

        branch.files.insert(
            path.to_string(),
            FileRecord {
                content: content.to_string(),
                sha: file_sha,
            },
        );
        branch.commits.push(CommitRecord {
            sha: commit_sha.clone(),
            path: path.to_string(),
            message: message.to_string(),
            date: Utc::now(),
            snapshot: Some(content.to_string()),
        });
        Ok(commit_sha)
    }

    async fn update_file(
        &self,
        path: &str,
        branch: &str,
        message: &str,
        content: &str,
        sha: &str,
    ) -> Result<String, ProviderError> {
        let mut state = self.state.lock();
        let file_sha = state.next_sha("blob");
        let commit_sha = state.next_sha("commit");

        let branch = state.branch_mut(branch)?;
        let record = branch
            .files
            .get_mut(path)
            .ok_or_else(|| ProviderError::NotFound(format!("'{path}' not found")))?;

        if record.sha != sha {
            return Err(ProviderError::Conflict(format!(
                "'{path}' does not match the supplied sha"
            )));
        }

        record.content = content.to_string();
        record.sha = file_sha;
        branch.commits.push(CommitRecord {
            sha: commit_sha.clone(),
            path: path.to_string(),
            message: message.to_string(),
            date: Utc::now(),
            snapshot: Some(content.to_string()),
        });
        Ok(commit_sha)
    }

    async fn delete_file(
        &self,
        path: &str,
        branch: &str,
        message: &str,
        sha: &str,
    ) -> Result<(), ProviderError> {
        let mut state = self.state.lock();
        let commit_sha = state.next_sha("commit");

        let branch = state.branch_mut(branch)?;
        let record = branch
            .files
            .get(path)
            .ok_or_else(|| ProviderError::NotFound(format!("'{path}' not found")))?;

        if record.sha != sha {
            return Err(ProviderError::Conflict(format!(
                "'{path}' does not match the supplied sha"
            )));
        }

        branch.files.remove(path);
        branch.commits.push(CommitRecord {
            sha: commit_sha,
            path: path.to_string(),
            message: message.to_string(),
            date: Utc::now(),
            snapshot: None,
        });
        Ok(())
    }

    async fn list_commits(
        &self,
        path: &str,
        branch: &str,
    ) -> Result<Vec<CommitInfo>, ProviderError> {
        let state = self.state.lock();
        let branch = state
            .branches
            .get(branch)
            .ok_or_else(|| ProviderError::NotFound(format!("branch '{branch}' not found")))?;

        Ok(branch
            .commits
            .iter()
            .rev()
            .filter(|c| c.path == path)
            .map(|c| CommitInfo {
                sha: c.sha.clone(),
                message: c.message.clone(),
                author: AUTHOR.to_string(),
                date: c.date,
            })
            .collect())
    }

    async fn list_directory(
        &self,
        path: &str,
        reference: &str,
    ) -> Result<Vec<RepoEntry>, ProviderError> {
        let state = self.state.lock();
        let branch = state
            .branches
            .get(reference)
            .ok_or_else(|| ProviderError::NotFound(format!("branch '{reference}' not found")))?;

        let prefix = format!("{}/", path.trim_end_matches('/'));
        let mut entries: Vec<RepoEntry> = branch
            .files
            .keys()
            .filter_map(|file_path| {
                let rest = file_path.strip_prefix(&prefix)?;
                // Only entries directly under the directory.
                if rest.is_empty() || rest.contains('/') {
                    return None;
                }
                Some(RepoEntry {
                    name: rest.to_string(),
                    path: file_path.clone(),
                    kind: EntryKind::File,
                })
            })
            .collect();

        if entries.is_empty() && !branch.files.keys().any(|p| p.starts_with(&prefix)) {
            return Err(ProviderError::NotFound(format!(
                "'{path}' not found on '{reference}'"
            )));
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
