//! Extraction of a block's inputs and outputs.

use ahash::AHashMap;

use crate::doc::TypeDefinition;
use crate::error::ExtractionError;
use crate::metadata::IoDescriptor;

use super::{
    BASE_INPUT_NAME_TAG, INPUT_PREFIX, INPUT_TYPE_PREFIX, OUTPUT_PREFIX, OUTPUT_TYPE_PREFIX,
    PROCESS_ACTION, IdRegistry, documented_type, parse_description, qualified_type,
    string_override,
};

/// Collects the inputs of a block: parameters of the `$process` action whose
/// name carries the input prefix.
pub(super) fn extract_inputs(
    ty: &TypeDefinition,
    ids: &mut IdRegistry,
) -> Result<Vec<IoDescriptor>, ExtractionError> {
    let display_names = input_display_names(ty);

    let mut inputs = Vec::new();
    for action in ty
        .actions
        .iter()
        .filter(|a| a.name.as_deref() == Some(PROCESS_ACTION))
    {
        for parameter in &action.parameters {
            let Some(id) = parameter
                .name
                .as_deref()
                .and_then(|n| n.strip_prefix(INPUT_PREFIX))
                .filter(|rest| !rest.trim().is_empty())
            else {
                continue;
            };
            ids.claim(id, "input")?;

            let declared = parameter.param_type.as_deref().ok_or_else(|| {
                ExtractionError::MissingParameterType {
                    member: format!("{INPUT_PREFIX}{id}"),
                }
            })?;
            let mut io_type = qualified_type(parameter.package.as_deref(), declared);

            // An explicit type override beats the declared type.
            if let Some(override_type) =
                string_override(ty, &format!("{INPUT_TYPE_PREFIX}{id}"))?
            {
                io_type = override_type;
            }
            if io_type.eq_ignore_ascii_case("optional") {
                // optional<T>: only T is documented.
                io_type = parameter
                    .type_parameter()
                    .and_then(|p| p.param_type.clone())
                    .ok_or_else(|| ExtractionError::MissingParameterType {
                        member: format!("{INPUT_PREFIX}{id}"),
                    })?;
            }

            let name = display_names
                .get(id)
                .filter(|n| !n.is_empty())
                .cloned()
                .unwrap_or_else(|| id.to_string());

            let mut input = IoDescriptor {
                id: id.to_string(),
                name,
                io_type: documented_type(io_type),
                description: None,
                extended_description: None,
            };
            if let Some(text) = parameter.description.as_deref() {
                let parsed = parse_description(text, false);
                input.description = parsed.description;
                input.extended_description = parsed.extended;
            }
            inputs.push(input);
        }
    }
    Ok(inputs)
}

/// Per-input display names declared through `$inputName` tags on the
/// `$process` action: first whitespace-delimited token is the input id, the
/// remainder is the name.
fn input_display_names(ty: &TypeDefinition) -> AHashMap<String, String> {
    let mut names = AHashMap::new();
    for action in ty
        .actions
        .iter()
        .filter(|a| a.name.as_deref() == Some(PROCESS_ACTION))
    {
        for field in action
            .dollar_fields
            .iter()
            .filter(|f| f.name == BASE_INPUT_NAME_TAG)
        {
            let Some(text) = field.description.as_deref().map(str::trim).filter(|t| !t.is_empty())
            else {
                continue;
            };
            match text.find(' ') {
                Some(split) => names.insert(
                    text[..split].trim().to_string(),
                    text[split..].trim().to_string(),
                ),
                None => names.insert(text.to_string(), String::new()),
            };
        }
    }
    names
}

/// Collects the outputs of a block: `action`-typed members whose name carries
/// the output prefix. A wrong number of formal parameters skips that one
/// output; the remaining outputs are still extracted.
pub(super) fn extract_outputs(
    ty: &TypeDefinition,
    ids: &mut IdRegistry,
) -> Result<Vec<IoDescriptor>, ExtractionError> {
    let mut outputs = Vec::new();
    for member in ty
        .members
        .iter()
        .filter(|m| m.member_type.as_deref() == Some("action"))
    {
        let Some(id) = member
            .name
            .as_deref()
            .and_then(|n| n.strip_prefix(OUTPUT_PREFIX))
            .filter(|rest| !rest.trim().is_empty())
        else {
            continue;
        };
        ids.claim(id, "output")?;

        // Expected shape: (event channel, payload).
        if member.parameters.len() != 2 {
            log::error!(
                "Incorrect number of arguments found for output '{id}'. Argument count {}",
                member.parameters.len()
            );
            continue;
        }
        let payload = &member.parameters[1];
        let declared = payload.param_type.as_deref().ok_or_else(|| {
            ExtractionError::MissingParameterType {
                member: format!("{OUTPUT_PREFIX}{id}"),
            }
        })?;
        let mut io_type = qualified_type(payload.package.as_deref(), declared);
        if let Some(override_type) =
            string_override(ty, &format!("{OUTPUT_TYPE_PREFIX}{}", id.trim()))?
        {
            io_type = override_type;
        }

        let mut output = IoDescriptor {
            id: id.to_string(),
            name: id.to_string(),
            io_type: documented_type(io_type),
            description: None,
            extended_description: None,
        };
        if let Some(text) = member.description.as_deref() {
            let parsed = parse_description(text, true);
            output.description = parsed.description;
            output.extended_description = parsed.extended;
            if let Some(name) = parsed.name.filter(|n| !n.is_empty()) {
                output.name = name;
            }
        }
        outputs.push(output);
    }
    Ok(outputs)
}
