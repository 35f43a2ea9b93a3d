//! Server settings.
//!
//! Built once at startup and passed into components explicitly; nothing
//! reads configuration after construction. Sources, later ones winning:
//! built-in defaults, an optional `strata.*` file in the working directory,
//! then `STRATA__`-prefixed environment variables (`__` as the section
//! separator, e.g. `STRATA__GITHUB__TOKEN`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;

use strata_store::strata_core::Format;

/// Immutable application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// HTTP listener settings.
    pub server: ServerSettings,
    /// Repository backend settings.
    pub github: GitHubSettings,
    /// Formats this deployment accepts. A subset of the compiled-in set.
    pub supported_formats: Vec<Format>,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Repository backend settings.
#[derive(Clone, Deserialize)]
pub struct GitHubSettings {
    /// `owner/repo` or a full GitHub URL.
    pub repo: String,
    /// Access token with contents read/write permission. Required.
    pub token: String,
    /// API base URL, overridable for GitHub Enterprise.
    pub api_base: String,
}

// Custom Debug to keep the token out of logs
impl fmt::Debug for GitHubSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubSettings")
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Settings {
    /// Loads settings from defaults, the optional `strata` config file, and
    /// the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8888_i64)?
            .set_default("github.api_base", "https://api.github.com")?
            .set_default(
                "supported_formats",
                vec!["json", "toml", "xml", "yaml", "jinja2"],
            )?
            .add_source(File::with_name("strata").required(false))
            .add_source(
                Environment::with_prefix("STRATA")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("supported_formats"),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns true if this deployment accepts the given format.
    pub fn is_supported(&self, format: Format) -> bool {
        self.supported_formats.contains(&format)
    }
}
