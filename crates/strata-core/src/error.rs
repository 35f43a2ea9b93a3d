//! Error types for content codecs.
//!
//! Codec failures are pure validation errors: they carry the offending
//! format name and the underlying parser message, and never leave a
//! partially decoded document behind.

use thiserror::Error;

/// Errors produced while decoding or encoding configuration content.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The requested format is not one this build knows about.
    #[error("Unsupported format: {format}")]
    Unsupported {
        /// The format name as the caller supplied it
        format: String,
    },

    /// Content failed to parse as its declared format.
    #[error("Invalid {format} format: {message}")]
    Parse {
        /// Format that was being decoded
        format: &'static str,
        /// Underlying parser message
        message: String,
    },

    /// A document could not be serialized into its declared format.
    #[error("Error formatting {format}: {message}")]
    Serialize {
        /// Format that was being encoded
        format: &'static str,
        /// Underlying serializer message
        message: String,
    },

    /// The document is missing a field the format requires.
    #[error("{format} document is missing required field '{field}'")]
    MissingField {
        /// Format that was being encoded
        format: &'static str,
        /// Name of the missing field
        field: &'static str,
    },
}

impl FormatError {
    /// Creates a Parse error from anything displayable.
    pub fn parse(format: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Parse {
            format,
            message: message.to_string(),
        }
    }

    /// Creates a Serialize error from anything displayable.
    pub fn serialize(format: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Serialize {
            format,
            message: message.to_string(),
        }
    }

    /// Returns true if this error names an unknown format.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, FormatError>;
