//! Jinja2 template codec.
//!
//! Templates are not data: decoding never renders or parses them into a
//! document tree. It validates the syntax, statically collects the free
//! variable names the template references, and hands back the source text
//! untouched alongside that variable set. Encoding returns the stored
//! template verbatim so the persisted artifact is byte-identical to what
//! the caller uploaded.

use minijinja::Environment;

use crate::document::{ConfigDocument, ConfigValue};
use crate::error::{FormatError, Result};
use crate::format::FormatCodec;

/// Document field holding the template source.
const TEMPLATE_FIELD: &str = "template";

/// Document field holding the collected variable names.
const VARIABLES_FIELD: &str = "variables";

pub struct TemplateCodec;

impl FormatCodec for TemplateCodec {
    fn decode(&self, input: &str) -> Result<ConfigDocument> {
        let variables = undeclared_variables(input)?;

        let mut doc = ConfigDocument::new();
        doc.insert(TEMPLATE_FIELD, input);
        doc.insert(
            VARIABLES_FIELD,
            ConfigValue::Array(variables.into_iter().map(ConfigValue::String).collect()),
        );
        Ok(doc)
    }

    fn encode(&self, document: &ConfigDocument) -> Result<String> {
        let template = document
            .get(TEMPLATE_FIELD)
            .and_then(ConfigValue::as_str)
            .ok_or(FormatError::MissingField {
                format: "jinja2",
                field: TEMPLATE_FIELD,
            })?;

        // Re-validate before accepting; the stored text must always be a
        // syntactically valid template.
        undeclared_variables(template)?;
        Ok(template.to_string())
    }
}

/// Parses the template and returns the sorted set of variable names it
/// references without declaring.
fn undeclared_variables(source: &str) -> Result<Vec<String>> {
    let env = Environment::new();
    let template = env
        .template_from_str(source)
        .map_err(|e| FormatError::parse("jinja2", e))?;

    let mut variables: Vec<String> = template.undeclared_variables(false).into_iter().collect();
    variables.sort();
    Ok(variables)
}
