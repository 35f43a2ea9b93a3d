use crate::document::ConfigDocument;
use crate::error::{FormatError, Result};
use crate::format::FormatCodec;

pub struct JsonCodec;

impl FormatCodec for JsonCodec {
    fn decode(&self, input: &str) -> Result<ConfigDocument> {
        serde_json::from_str(input).map_err(|e| FormatError::parse("json", e))
    }

    fn encode(&self, document: &ConfigDocument) -> Result<String> {
        serde_json::to_string_pretty(document).map_err(|e| FormatError::serialize("json", e))
    }
}
