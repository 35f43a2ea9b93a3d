//! Error types for providers and the version store.

use strata_core::FormatError;

/// Errors surfaced by a repository backend.
///
/// These map the wire-level failure modes of a hosting provider onto a
/// provider-neutral taxonomy. Every [`RepoProvider`](crate::RepoProvider)
/// implementation, remote or in-memory, reports through this enum so the
/// store layer never sees provider-specific shapes.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The path, branch, or ref does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Create was attempted on a path that already exists.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The precondition token did not match the object's current state.
    /// Another writer won the race; the caller must re-read and retry.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Authentication failed (invalid token, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The provider's rate limit was hit.
    #[error("rate limited")]
    RateLimited,

    /// The provider returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the provider
        message: String,
    },

    /// Network or connection failure.
    #[error("network error: {0}")]
    Network(String),

    /// The provider's response could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Errors surfaced by the version store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Content failed to decode or encode for its declared format.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The config, project, or path does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Create was attempted on a config that already exists.
    #[error("config already exists: {0}")]
    AlreadyExists(String),

    /// A concurrent writer updated the config first.
    #[error("conflict: {0}")]
    Conflict(String),

    /// No history entry carries the requested version number.
    #[error("Version {0} not found")]
    VersionNotFound(u64),

    /// Pagination parameters are out of bounds.
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    /// The repository backend failed in a way that is not the caller's
    /// fault. Carries the provider error unchanged.
    #[error("backend error: {0}")]
    Backend(ProviderError),
}

impl From<ProviderError> for StoreError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound(msg) => StoreError::NotFound(msg),
            ProviderError::AlreadyExists(msg) => StoreError::AlreadyExists(msg),
            ProviderError::Conflict(msg) => StoreError::Conflict(msg),
            other => StoreError::Backend(other),
        }
    }
}

impl StoreError {
    /// Returns true if the error means the resource is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::VersionNotFound(_))
    }

    /// Returns true if the error is a lost optimistic-concurrency race.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
