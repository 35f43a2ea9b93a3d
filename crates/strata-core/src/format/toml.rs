use ordered_float::OrderedFloat;

use crate::document::{ConfigDocument, ConfigValue};
use crate::error::{FormatError, Result};
use crate::format::FormatCodec;

pub struct TomlCodec;

impl FormatCodec for TomlCodec {
    fn decode(&self, input: &str) -> Result<ConfigDocument> {
        let table: toml::Table = input.parse().map_err(|e| FormatError::parse("toml", e))?;
        Ok(table
            .into_iter()
            .map(|(k, v)| (k, value_from_toml(v)))
            .collect())
    }

    fn encode(&self, document: &ConfigDocument) -> Result<String> {
        let mut table = toml::Table::new();
        for (key, value) in document.iter() {
            table.insert(key.clone(), value_to_toml(value)?);
        }
        toml::to_string(&table).map_err(|e| FormatError::serialize("toml", e))
    }
}

fn value_from_toml(value: toml::Value) -> ConfigValue {
    match value {
        toml::Value::String(s) => ConfigValue::String(s),
        toml::Value::Integer(i) => ConfigValue::Integer(i),
        toml::Value::Float(f) => ConfigValue::Float(OrderedFloat(f)),
        toml::Value::Boolean(b) => ConfigValue::Bool(b),
        // TOML datetimes have no document-model counterpart; keep the text.
        toml::Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
        toml::Value::Array(arr) => {
            ConfigValue::Array(arr.into_iter().map(value_from_toml).collect())
        }
        toml::Value::Table(table) => ConfigValue::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, value_from_toml(v)))
                .collect(),
        ),
    }
}

fn value_to_toml(value: &ConfigValue) -> Result<toml::Value> {
    match value {
        ConfigValue::Null => Err(FormatError::serialize(
            "toml",
            "null values are not representable in TOML",
        )),
        ConfigValue::Bool(b) => Ok(toml::Value::Boolean(*b)),
        ConfigValue::Integer(i) => Ok(toml::Value::Integer(*i)),
        ConfigValue::Float(f) => Ok(toml::Value::Float(f.into_inner())),
        ConfigValue::String(s) => Ok(toml::Value::String(s.clone())),
        ConfigValue::Array(arr) => Ok(toml::Value::Array(
            arr.iter().map(value_to_toml).collect::<Result<_>>()?,
        )),
        ConfigValue::Object(obj) => {
            let mut table = toml::Table::new();
            for (k, v) in obj {
                table.insert(k.clone(), value_to_toml(v)?);
            }
            Ok(toml::Value::Table(table))
        }
    }
}
