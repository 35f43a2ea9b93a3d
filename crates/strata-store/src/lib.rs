//! # Strata Store
//!
//! The version store engine for Strata Config: turns an opaque, linear
//! commit history held by a hosting provider into a monotonically numbered,
//! paginated, restorable version history.
//!
//! The crate has two halves:
//!
//! - [`provider`] is the narrow [`RepoProvider`] interface every repository
//!   backend implements, plus a GitHub REST implementation and an in-memory
//!   implementation for tests and local development.
//! - [`store`] is [`ConfigStore`], the policy layer: version derivation from
//!   commit messages, history pagination, and create/update/delete/recover
//!   orchestration with optimistic concurrency.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use strata_core::{ConfigKey, Format};
//! use strata_store::{ConfigStore, GitHubProvider};
//!
//! let provider = GitHubProvider::new("ghp_xxx", "acme", "config-repo")?;
//! let store = ConfigStore::new(Arc::new(provider));
//!
//! let key = ConfigKey::new("payments", "database", Format::Json);
//! let latest = store.read(&key).await?;
//! ```

pub mod error;
pub mod provider;
pub mod store;

// Re-exports
pub use error::{ProviderError, StoreError};
pub use provider::{CommitInfo, EntryKind, RepoEntry, RepoFile, RepoProvider};
pub use provider::github::GitHubProvider;
pub use provider::memory::MemoryProvider;
pub use store::{ConfigInfo, ConfigStore, ConfigVersion, Pagination, RecoverOutcome, VersionPage, WriteOutcome};

// Re-export strata_core for consumers
pub use strata_core;
