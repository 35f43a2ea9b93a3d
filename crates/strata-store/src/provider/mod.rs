//! Repository backend abstraction.
//!
//! A [`RepoProvider`] is a remote versioned-file store addressed by
//! `(branch, path)`. It is the sole owner of durable state: the store layer
//! above never persists anything itself. The interface is deliberately
//! narrow so the version algorithm can be exercised against an in-memory
//! fake, and every mutation takes an explicit precondition token so the
//! backend can arbitrate concurrent writers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

pub mod github;
pub mod memory;

/// A file snapshot plus its identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFile {
    /// Decoded text content of the file.
    pub content: String,
    /// Opaque token identifying this exact object state. Required as the
    /// precondition for conditional updates and deletes.
    pub sha: String,
}

/// Metadata of one commit touching a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Backend-assigned commit identifier.
    pub sha: String,
    /// Full commit message.
    pub message: String,
    /// Author display name.
    pub author: String,
    /// Author timestamp.
    pub date: DateTime<Utc>,
}

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    /// File or directory name (last path segment).
    pub name: String,
    /// Full path within the repository.
    pub path: String,
    /// Entry kind.
    pub kind: EntryKind,
}

/// A versioned-file store addressed by `(branch, path)`.
///
/// `reference` parameters accept either a branch name (the current head) or
/// a commit sha (a historical snapshot). Mutations are atomic: they either
/// create exactly one commit or leave the store unchanged.
#[async_trait]
pub trait RepoProvider: Send + Sync {
    /// Fetches a file's content and identity token at a reference.
    async fn get_file(&self, path: &str, reference: &str) -> Result<RepoFile, ProviderError>;

    /// Creates a new file on a branch. Fails with
    /// [`ProviderError::AlreadyExists`] if the path exists and
    /// [`ProviderError::NotFound`] if the branch does not.
    /// Returns the new commit's sha.
    async fn create_file(
        &self,
        path: &str,
        branch: &str,
        message: &str,
        content: &str,
    ) -> Result<String, ProviderError>;

    /// Replaces a file's content on a branch, conditional on `sha` matching
    /// the file's current identity token. A mismatch fails with
    /// [`ProviderError::Conflict`] and writes nothing.
    /// Returns the new commit's sha.
    async fn update_file(
        &self,
        path: &str,
        branch: &str,
        message: &str,
        content: &str,
        sha: &str,
    ) -> Result<String, ProviderError>;

    /// Deletes a file on a branch, conditional on `sha` like
    /// [`update_file`](Self::update_file).
    async fn delete_file(
        &self,
        path: &str,
        branch: &str,
        message: &str,
        sha: &str,
    ) -> Result<(), ProviderError>;

    /// Lists every commit touching `path` on `branch`, newest first.
    /// The returned order is the backend's and must not be re-sorted.
    async fn list_commits(
        &self,
        path: &str,
        branch: &str,
    ) -> Result<Vec<CommitInfo>, ProviderError>;

    /// Lists the entries directly under a directory at a reference.
    async fn list_directory(
        &self,
        path: &str,
        reference: &str,
    ) -> Result<Vec<RepoEntry>, ProviderError>;
}
