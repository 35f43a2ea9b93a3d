use serde::Serialize;

/// Response for a successful create.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub commit_sha: String,
}

/// Response for a successful update.
#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub message: String,
    pub version: u64,
    pub commit_sha: String,
}

/// Response for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
}

/// Response for a successful version recovery.
#[derive(Debug, Serialize)]
pub struct RecoveredResponse {
    pub message: String,
    pub original_version: u64,
    pub new_version: u64,
    pub commit_sha: String,
}
