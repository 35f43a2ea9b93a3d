//! Strata Core - domain types and pure codecs
//!
//! This crate holds everything that does not touch the network: the
//! configuration document model, the per-format content codecs, the commit
//! message version tagging, and the key/path mapping.

pub mod document;
pub mod error;
pub mod format;
pub mod types;
pub mod version;

pub use document::{ConfigDocument, ConfigValue};
pub use error::{FormatError, Result};
pub use format::Format;
pub use types::{ConfigKey, Project};
pub use version::{extract_version, tag_message};

/// Returns the crate version.
pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
