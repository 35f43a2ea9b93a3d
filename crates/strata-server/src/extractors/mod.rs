//! Path and query extractors for the config routes.

mod path;
mod query;

pub use path::{ConfigPath, ProjectPath, RecoverPath};
pub use query::{FormatQuery, MutationQuery, VersionsQuery};
