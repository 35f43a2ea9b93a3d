use serde::Deserialize;

/// Extractor for `/configs/{project}` routes.
#[derive(Debug, Deserialize)]
pub struct ProjectPath {
    pub project: String,
}

impl ProjectPath {
    pub fn validate(&self) -> Result<(), String> {
        if self.project.trim().is_empty() {
            return Err("Project cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Extractor for `/configs/{project}/{name}` routes.
#[derive(Debug, Deserialize)]
pub struct ConfigPath {
    pub project: String,
    pub name: String,
}

impl ConfigPath {
    /// Validates that the segments are non-empty.
    pub fn validate(&self) -> Result<(), String> {
        if self.project.trim().is_empty() {
            return Err("Project cannot be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("Config name cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Extractor for `/configs/{project}/{name}/recover/{version}` routes.
#[derive(Debug, Deserialize)]
pub struct RecoverPath {
    pub project: String,
    pub name: String,
    pub version: u64,
}

impl RecoverPath {
    pub fn validate(&self) -> Result<(), String> {
        if self.project.trim().is_empty() {
            return Err("Project cannot be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("Config name cannot be empty".to_string());
        }
        if self.version == 0 {
            return Err("Version must be at least 1".to_string());
        }
        Ok(())
    }
}
