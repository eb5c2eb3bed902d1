//! Extraction of a block's parameters and their enumerated values.
//!
//! Parameters live on a convention-named companion event type
//! `<Block>_$Parameters`: one member per parameter, plus constant members
//! representing the enumerated choices of a parameter.

use ahash::AHashMap;
use itertools::Itertools;

use crate::doc::{DocumentTree, Member, TypeDefinition};
use crate::error::ExtractionError;
use crate::metadata::{EnumValue, Parameter};

use super::{
    DEFAULT_VALUE_PREFIX, IdRegistry, PARAMETERS_SUFFIX, find_default_value, parse_description,
};
use crate::extract::types::{resolve_member_type, type_underscore_name};

const SEMANTIC_TYPE_TAG: &str = "$semanticType";
const DISPLAY_TYPE_TAG: &str = "$displayType";
const MIN_NUM_ENTRIES_TAG: &str = "$minNumEntries";
const OPTIONAL_TAG: &str = "$optional";
const DISPLAY_HEADER_TAGS: [(&str, &str); 2] = [
    ("$displayHeaderName", "name"),
    ("$displayHeaderValue", "value"),
];

/// Collects the parameters of a block from its companion parameters type.
/// A referenced-but-missing parameters type yields an empty list.
pub(super) fn extract_parameters(
    ty: &TypeDefinition,
    tree: &DocumentTree,
    ids: &mut IdRegistry,
) -> Result<Vec<Parameter>, ExtractionError> {
    let holder_name = format!("{}{}", ty.name.trim(), PARAMETERS_SUFFIX);
    let Some(holder_member) = ty.member_of_type(&holder_name) else {
        return Ok(Vec::new());
    };
    let package = holder_member.package.as_deref().unwrap_or("");
    let Some(params_type) = tree.find_event_type(package, &holder_name) else {
        log::error!("Parameter element not found. Parameter type = {package}.{holder_name}");
        return Ok(Vec::new());
    };

    let mut enum_values = collect_enum_values(params_type)?;

    let mut parameters = Vec::new();
    for (name, member) in params_type.named_members() {
        let resolved = resolve_member_type(member)?;
        if member.constant || !resolved.is_supported {
            continue;
        }
        let id = name.trim_matches(['\t', ' ']).to_string();
        ids.claim(&id, "parameter")?;

        let mut parameter = Parameter {
            id: id.clone(),
            name: id,
            param_type: resolved.name,
            ..Parameter::default()
        };

        parameter.semantic_type = member.tag_text(SEMANTIC_TYPE_TAG);
        parameter.display_type = member.tag_text(DISPLAY_TYPE_TAG);
        if let Some(text) = member.tag_text(MIN_NUM_ENTRIES_TAG) {
            parameter.min_num_entries =
                Some(
                    text.parse()
                        .map_err(|_| ExtractionError::NonNumericTag {
                            member: member.display_name().to_string(),
                            value: text.clone(),
                        })?,
                );
        }
        // `$optional` forces optionality in the UI, useful for `any` types.
        if member.has_tag(OPTIONAL_TAG) || resolved.is_optional {
            parameter.optional = Some(true);
        }
        for (tag, key) in DISPLAY_HEADER_TAGS {
            if let Some(text) = member.tag_text(tag) {
                parameter.display_headers.insert(key.to_string(), text);
            }
        }

        parameter.default_value =
            find_default_value(params_type, &format!("{DEFAULT_VALUE_PREFIX}{name}"))?;

        if let Some(text) = member.description.as_deref() {
            let parsed = parse_description(text, true);
            parameter.description = parsed.description;
            parameter.extended_description = parsed.extended;
            if let Some(name) = parsed.name.filter(|n| !n.is_empty()) {
                parameter.name = name;
            }
        }

        let enum_key = format!("{}_", type_underscore_name(member)?);
        if let Some(values) = enum_values.remove(&enum_key) {
            if !values.is_empty() {
                parameter.enumerated_values = values;
            }
        }

        parameters.push(parameter);
    }
    Ok(parameters)
}

/// Maps each candidate parameter key to the enum values attributed to it.
///
/// Constants follow the naming convention `<parentParameter>_<suffix>`, so a
/// constant is matched to the longest parameter key that prefixes its own
/// type-qualified key; the unmatched remainder becomes the enum id. When two
/// parameter names prefix one another (say `range` and `range_max`), the
/// longer one must win, hence the descending key order. A constant matching
/// no parameter key is dropped.
fn collect_enum_values(
    params_type: &TypeDefinition,
) -> Result<AHashMap<String, Vec<EnumValue>>, ExtractionError> {
    let mut values: AHashMap<String, Vec<EnumValue>> = AHashMap::new();
    for (_, member) in params_type.named_members() {
        let resolved = resolve_member_type(member)?;
        if !member.constant && resolved.is_supported {
            values.insert(format!("{}_", type_underscore_name(member)?), Vec::new());
        }
    }
    let keys: Vec<String> = values.keys().cloned().sorted().rev().collect();

    for (name, member) in params_type.named_members() {
        let resolved = resolve_member_type(member)?;
        if !member.constant || !resolved.is_supported {
            continue;
        }
        let constant_key = type_underscore_name(member)?;
        let Some(parent) = keys.iter().find(|k| constant_key.starts_with(k.as_str())) else {
            continue;
        };
        let Some(value) = enum_value(member, name, &constant_key[parent.len()..]) else {
            continue;
        };
        if let Some(list) = values.get_mut(parent.as_str()) {
            list.push(value);
        }
    }
    Ok(values)
}

/// Builds one enum value from a constant member; a missing or malformed
/// declared value skips just this constant.
fn enum_value(member: &Member, member_name: &str, enum_id: &str) -> Option<EnumValue> {
    let Some(raw) = member.type_value.as_deref() else {
        log::warn!("Enum constant '{member_name}' has no declared value; skipping it");
        return None;
    };
    let value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Enum constant '{member_name}' has a malformed value '{raw}': {err}");
            return None;
        }
    };

    let mut name = enum_id.to_string();
    let mut description = None;
    match member.description.as_deref() {
        Some(text) => {
            let parsed = parse_description(text, true);
            if let Some(parsed_name) = parsed.name.filter(|n| !n.is_empty()) {
                name = parsed_name;
            }
            description = parsed.description.filter(|d| !d.is_empty());
        }
        None => {
            log::info!("No documentation found for the name of enum '{member_name}'");
        }
    }

    Some(EnumValue {
        id: enum_id.to_string(),
        name,
        value,
        description,
    })
}
