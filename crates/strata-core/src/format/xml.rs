//! XML codec.
//!
//! The mapping is deliberately lossy: decoding takes each direct child of
//! the root element to a `(tag, text)` pair, discarding attributes and any
//! nested structure. This is a flat key/value view of an XML document, not a
//! DOM mapping.

use std::io::Cursor;

use quick_xml::Reader;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;

use crate::document::{ConfigDocument, ConfigValue};
use crate::error::{FormatError, Result};
use crate::format::FormatCodec;

/// Root element name used when encoding.
const ROOT_TAG: &str = "config";

pub struct XmlCodec;

impl FormatCodec for XmlCodec {
    fn decode(&self, input: &str) -> Result<ConfigDocument> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut doc = ConfigDocument::new();
        let mut depth = 0usize;
        let mut seen_root = false;
        // Tag and accumulated text of the direct child currently open.
        let mut current: Option<(String, Option<String>)> = None;
        // Set once the open child has nested elements; only text before the
        // first nested element counts as the child's own text.
        let mut nested = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    depth += 1;
                    match depth {
                        1 => {
                            if seen_root {
                                return Err(FormatError::parse(
                                    "xml",
                                    "junk after document element",
                                ));
                            }
                            seen_root = true;
                        }
                        2 => {
                            current = Some((tag_name(&start), None));
                            nested = false;
                        }
                        _ => nested = true,
                    }
                }
                Ok(Event::Empty(start)) => {
                    if depth == 0 {
                        if seen_root {
                            return Err(FormatError::parse("xml", "junk after document element"));
                        }
                        seen_root = true;
                    } else if depth == 1 {
                        doc.insert(tag_name(&start), ConfigValue::Null);
                    } else {
                        nested = true;
                    }
                }
                Ok(Event::Text(text)) => {
                    if depth == 2
                        && !nested
                        && let Some((_, value)) = current.as_mut()
                    {
                        let unescaped = text.unescape().map_err(|e| FormatError::parse("xml", e))?;
                        value.get_or_insert_with(String::new).push_str(&unescaped);
                    }
                }
                Ok(Event::End(_)) => {
                    if depth == 2
                        && let Some((tag, value)) = current.take()
                    {
                        match value {
                            Some(text) => doc.insert(tag, text),
                            // A child with no text maps to null, like an
                            // element whose `text` is absent.
                            None => doc.insert(tag, ConfigValue::Null),
                        }
                    }
                    depth = depth.saturating_sub(1);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(FormatError::parse("xml", e)),
            }
        }

        if !seen_root {
            return Err(FormatError::parse("xml", "no element found"));
        }
        Ok(doc)
    }

    fn encode(&self, document: &ConfigDocument) -> Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        write_event(&mut writer, Event::Start(BytesStart::new(ROOT_TAG)))?;
        for (key, value) in document.iter() {
            write_event(&mut writer, Event::Start(BytesStart::new(key.as_str())))?;
            let text = scalar_text(value)?;
            if !text.is_empty() {
                write_event(&mut writer, Event::Text(BytesText::new(&text)))?;
            }
            write_event(&mut writer, Event::End(BytesEnd::new(key.as_str())))?;
        }
        write_event(&mut writer, Event::End(BytesEnd::new(ROOT_TAG)))?;

        String::from_utf8(writer.into_inner().into_inner())
            .map_err(|e| FormatError::serialize("xml", e))
    }
}

fn tag_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn write_event(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| FormatError::serialize("xml", e))
}

/// Renders a value as element text. Arrays and objects are flattened into
/// their compact JSON rendering; the format cannot express them natively.
fn scalar_text(value: &ConfigValue) -> Result<String> {
    Ok(match value {
        ConfigValue::Null => String::new(),
        ConfigValue::Bool(b) => b.to_string(),
        ConfigValue::Integer(i) => i.to_string(),
        ConfigValue::Float(f) => f.to_string(),
        ConfigValue::String(s) => s.clone(),
        ConfigValue::Array(_) | ConfigValue::Object(_) => {
            serde_json::to_string(value).map_err(|e| FormatError::serialize("xml", e))?
        }
    })
}
