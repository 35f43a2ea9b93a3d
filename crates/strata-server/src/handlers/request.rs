use serde::Deserialize;

use strata_store::strata_core::ConfigDocument;

/// Body of create and update requests.
#[derive(Debug, Deserialize)]
pub struct ConfigPayload {
    /// The configuration content to store.
    pub content: ConfigDocument,
    /// Optional commit message; a default is generated when absent.
    #[serde(default)]
    pub message: Option<String>,
}
