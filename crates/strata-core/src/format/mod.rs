//! Content codecs.
//!
//! [`Format`] is a closed enum: one variant per format this build supports.
//! Adding a format means adding a variant and a codec module, checked at
//! compile time. Deployments can narrow the set at runtime through server
//! settings, but never extend it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::document::ConfigDocument;
use crate::error::{FormatError, Result};

pub mod json;
pub mod template;
pub mod toml;
pub mod xml;
pub mod yaml;

/// A content codec: pure transformation between serialized text and the
/// document model. Implementations must not have side effects.
pub trait FormatCodec: Send + Sync {
    /// Parses serialized text into a document.
    fn decode(&self, input: &str) -> Result<ConfigDocument>;

    /// Serializes a document into text.
    fn encode(&self, document: &ConfigDocument) -> Result<String>;
}

/// Supported configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Toml,
    Yaml,
    Xml,
    Jinja2,
}

impl Format {
    /// All formats this build knows about.
    pub const ALL: [Format; 5] = [
        Format::Json,
        Format::Toml,
        Format::Yaml,
        Format::Xml,
        Format::Jinja2,
    ];

    /// Returns the canonical file extension (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Toml => "toml",
            Format::Yaml => "yaml",
            Format::Xml => "xml",
            Format::Jinja2 => "jinja2",
        }
    }

    /// Guesses the format from a file extension (without dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            "yaml" | "yml" => Some(Format::Yaml),
            "xml" => Some(Format::Xml),
            "jinja2" | "j2" => Some(Format::Jinja2),
            _ => None,
        }
    }

    /// Returns the codec for this format.
    pub fn codec(&self) -> &'static dyn FormatCodec {
        match self {
            Format::Json => &json::JsonCodec,
            Format::Toml => &toml::TomlCodec,
            Format::Yaml => &yaml::YamlCodec,
            Format::Xml => &xml::XmlCodec,
            Format::Jinja2 => &template::TemplateCodec,
        }
    }

    /// Decodes serialized text into a document.
    pub fn decode(&self, input: &str) -> Result<ConfigDocument> {
        self.codec().decode(input)
    }

    /// Encodes a document into serialized text.
    pub fn encode(&self, document: &ConfigDocument) -> Result<String> {
        self.codec().encode(document)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s).ok_or_else(|| FormatError::Unsupported {
            format: s.to_string(),
        })
    }
}
