//! Cross-format codec behavior.

use strata_core::{ConfigDocument, ConfigValue, Format};

fn sample_document() -> ConfigDocument {
    let mut doc = ConfigDocument::new();
    doc.insert("name", "payment-service");
    doc.insert("port", 8080);
    doc.insert("debug", false);
    doc.insert("timeout", 2.5);
    doc.insert("hosts", vec!["a.internal", "b.internal"]);
    doc
}

#[test]
fn structured_formats_roundtrip() {
    for format in [Format::Json, Format::Toml, Format::Yaml] {
        let doc = sample_document();
        let text = format.encode(&doc).unwrap();
        let back = format.decode(&text).unwrap();
        assert_eq!(back, doc, "round-trip failed for {format}");
    }
}

#[test]
fn xml_roundtrips_flat_string_documents() {
    let mut doc = ConfigDocument::new();
    doc.insert("host", "localhost");
    doc.insert("region", "us-east-1");

    let text = Format::Xml.encode(&doc).unwrap();
    assert_eq!(Format::Xml.decode(&text).unwrap(), doc);
}

#[test]
fn template_roundtrip_preserves_source_and_recomputes_variables() {
    let source = "upstream {{ backend }} {\n  server {{ host }}:{{ port }};\n}\n";

    let doc = Format::Jinja2.decode(source).unwrap();
    let encoded = Format::Jinja2.encode(&doc).unwrap();
    assert_eq!(encoded, source);

    let again = Format::Jinja2.decode(&encoded).unwrap();
    assert_eq!(again, doc);

    let vars: Vec<&str> = doc
        .get("variables")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .filter_map(ConfigValue::as_str)
        .collect();
    assert_eq!(vars, ["backend", "host", "port"]);
}

#[test]
fn decode_failures_name_the_format() {
    let err = Format::Toml.decode("{\"this\": \"is json\"}").unwrap_err();
    assert!(err.to_string().contains("toml"));

    let err = Format::Json.decode("port = 8080").unwrap_err();
    assert!(err.to_string().contains("json"));
}

#[test]
fn no_partial_documents_on_failure() {
    // A document that fails half-way through serialization must not leak a
    // truncated result; the call returns an error instead.
    let mut doc = ConfigDocument::new();
    doc.insert("ok", "fine");
    doc.insert("bad", ConfigValue::Null);
    assert!(Format::Toml.encode(&doc).is_err());
}
