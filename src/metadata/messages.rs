//! Flattening of human-readable metadata strings into a message table.
//!
//! Every display string of every block (and of its nested inputs, outputs,
//! parameters, enum values and display headers) is keyed by a deterministic
//! id so a localization step can ship one catalog entry per locale.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{Block, MetadataDocument};

const BLOCK_PREFIX: &str = "block";
const SEPARATOR: char = '_';

/// String properties flattened at every level.
const SIMPLE_PROPERTIES: [&str; 5] = [
    "name",
    "description",
    "extendedDescription",
    "displayType",
    "derivedName",
];

/// Block properties holding lists of id-carrying entries.
const NESTED_PROPERTIES: [&str; 3] = ["inputs", "outputs", "parameters"];

const ENUM_VALUES: &str = "enumeratedValues";
const ENUM_SEGMENT: &str = "enums";
const DISPLAY_HEADERS: &str = "displayHeaders";
const DISPLAY_HEADER_KEYS: [&str; 2] = ["name", "value"];

/// Builds the message table for a whole document: message id to display
/// string, with braces escaped for literal embedding.
pub fn extract_messages(doc: &MetadataDocument) -> Result<BTreeMap<String, String>, serde_json::Error> {
    let mut messages = BTreeMap::new();
    for block in &doc.analytics {
        extract_block_messages(block, &mut messages)?;
    }
    Ok(messages)
}

fn extract_block_messages(
    block: &Block,
    messages: &mut BTreeMap<String, String>,
) -> Result<(), serde_json::Error> {
    // Walk the serialized form so the key names match the JSON artifact.
    let value = serde_json::to_value(block)?;
    let Some(object) = value.as_object() else {
        return Ok(());
    };

    let base = format!("{BLOCK_PREFIX}{SEPARATOR}{}", block.id);
    collect_simple(object, &base, messages);
    for property in NESTED_PROPERTIES {
        if let Some(Value::Array(entries)) = object.get(property) {
            collect_entries(entries, &format!("{base}{SEPARATOR}{property}"), messages);
        }
    }
    Ok(())
}

/// Flattens a list of id-carrying entries, recursing into enum values and
/// display headers. Entries without an id are ignored.
fn collect_entries(entries: &[Value], base: &str, messages: &mut BTreeMap<String, String>) {
    for entry in entries.iter().filter_map(Value::as_object) {
        let Some(id) = entry.get("id").and_then(Value::as_str) else {
            continue;
        };
        let entry_base = format!("{base}{SEPARATOR}{id}");
        collect_simple(entry, &entry_base, messages);

        if let Some(Value::Array(enums)) = entry.get(ENUM_VALUES) {
            collect_entries(
                enums,
                &format!("{entry_base}{SEPARATOR}{ENUM_SEGMENT}"),
                messages,
            );
        }
        if let Some(Value::Object(headers)) = entry.get(DISPLAY_HEADERS) {
            for key in DISPLAY_HEADER_KEYS {
                if let Some(text) = headers.get(key).and_then(Value::as_str) {
                    messages.insert(
                        format!("{entry_base}{SEPARATOR}{DISPLAY_HEADERS}{SEPARATOR}{key}"),
                        mangle_braces(text),
                    );
                }
            }
        }
    }
}

fn collect_simple(
    object: &serde_json::Map<String, Value>,
    base: &str,
    messages: &mut BTreeMap<String, String>,
) {
    for property in SIMPLE_PROPERTIES {
        if let Some(text) = object.get(property).and_then(Value::as_str) {
            messages.insert(format!("{base}{SEPARATOR}{property}"), mangle_braces(text));
        }
    }
}

/// Doubles every literal brace so the string survives embedding inside a
/// templated message.
fn mangle_braces(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '{' || c == '}' {
            escaped.push(c);
        }
        escaped.push(c);
    }
    escaped
}
