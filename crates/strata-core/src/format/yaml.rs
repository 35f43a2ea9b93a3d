use crate::document::ConfigDocument;
use crate::error::{FormatError, Result};
use crate::format::FormatCodec;

pub struct YamlCodec;

impl FormatCodec for YamlCodec {
    fn decode(&self, input: &str) -> Result<ConfigDocument> {
        serde_yaml::from_str(input).map_err(|e| FormatError::parse("yaml", e))
    }

    fn encode(&self, document: &ConfigDocument) -> Result<String> {
        serde_yaml::to_string(document).map_err(|e| FormatError::serialize("yaml", e))
    }
}
