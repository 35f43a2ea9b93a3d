use serde::Deserialize;

/// Query parameters for read and create endpoints.
#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    /// Requested content format, checked against the deployment's
    /// supported set before anything else happens.
    pub format: String,
}

/// Query parameters for delete and recover endpoints.
#[derive(Debug, Deserialize)]
pub struct MutationQuery {
    pub format: String,
    /// Optional commit message override.
    pub message: Option<String>,
}

fn default_limit() -> usize {
    10
}

/// Query parameters for the version-history endpoint.
///
/// `skip` is unsigned: a negative value fails deserialization and is
/// rejected with 400 before any handler code runs.
#[derive(Debug, Deserialize)]
pub struct VersionsQuery {
    pub format: String,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}
