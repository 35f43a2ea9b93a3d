//! Identity types for configuration resources.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format::Format;

/// Project identifier.
///
/// A project is an isolation unit backed by a branch in the repository:
/// a project's configs live only on that branch, so configs from different
/// projects can never leak into each other's history.
///
/// # Example
///
/// ```
/// use strata_core::Project;
///
/// let project = Project::new("payments");
/// assert_eq!(project.as_str(), "payments");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Project(String);

impl Project {
    /// Creates a new Project identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the project name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Project {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Project {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Full identity of a configuration resource.
///
/// The format is part of the identity: the same name under two formats is
/// two distinct configs stored at two distinct paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigKey {
    project: Project,
    name: String,
    format: Format,
}

impl ConfigKey {
    /// Creates a new key.
    pub fn new(project: impl Into<Project>, name: impl Into<String>, format: Format) -> Self {
        Self {
            project: project.into(),
            name: name.into(),
            format,
        }
    }

    /// Returns the project this config belongs to.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Returns the config name (without extension).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the content format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Returns the branch that isolates this config's history.
    pub fn branch(&self) -> &str {
        self.project.as_str()
    }

    /// Returns the deterministic backend path for this key.
    ///
    /// ```
    /// use strata_core::{ConfigKey, Format};
    ///
    /// let key = ConfigKey::new("payments", "database", Format::Json);
    /// assert_eq!(key.path(), "payments/database.json");
    /// ```
    pub fn path(&self) -> String {
        format!("{}/{}.{}", self.project, self.name, self.format.extension())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
