//! The canonical block metadata model and its serialization.
//!
//! These are the records the UI/registry consumes. Optional attributes are
//! omitted from the JSON when absent or empty, never emitted as null.

mod messages;

pub use messages::extract_messages;

use serde::Serialize;
use std::collections::BTreeMap;

/// One logical plugin unit, assembled from a block-defining event type.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub consumes_input: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub produces_output: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_name: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub title_is_derived: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replaces_blocks: Vec<String>,
    pub inputs: Vec<IoDescriptor>,
    pub outputs: Vec<IoDescriptor>,
    pub parameters: Vec<Parameter>,
}

impl Block {
    pub fn new(id: String) -> Self {
        Block {
            id,
            ..Block::default()
        }
    }
}

/// An input or output of a block.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IoDescriptor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub io_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_description: Option<String>,
}

/// A configurable block parameter.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_num_entries: Option<f64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub display_headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enumerated_values: Vec<EnumValue>,
}

/// One enumerated choice of a parameter, matched to it by naming convention.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub id: String,
    pub name: String,
    pub value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The serialization unit: a version stamp plus the ordered block list.
#[derive(Debug, Clone, Serialize)]
pub struct MetadataDocument {
    pub version: String,
    pub analytics: Vec<Block>,
}

impl MetadataDocument {
    pub fn new(version: impl Into<String>, analytics: Vec<Block>) -> Self {
        MetadataDocument {
            version: version.into(),
            analytics,
        }
    }

    /// Serializes the document with alphabetically sorted keys and 4-space
    /// indentation. Identical input always yields byte-identical output so
    /// that builds can be diffed.
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        canonical_json(&serde_json::to_value(self)?)
    }
}

/// Pretty-prints a JSON value with sorted keys and 4-space indentation.
/// `serde_json::Value` objects are BTreeMap-backed, so key order is already
/// canonical once a value has been built.
pub fn canonical_json(value: &serde_json::Value) -> Result<String, serde_json::Error> {
    use serde::Serialize as _;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(serde::ser::Error::custom)
}
