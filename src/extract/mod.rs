//! The extraction pipeline: tag validation, block discovery, and assembly of
//! the canonical [`Block`](crate::metadata::Block) records from the
//! documentation tree.

use ahash::AHashMap;

use crate::doc::{DocumentTree, TypeDefinition};
use crate::error::ExtractionError;
use crate::metadata::Block;

mod io;
mod params;
pub mod types;
pub mod validate;

pub use validate::validate_tags;

/// The platform package holding the block base type.
pub const PLATFORM_PACKAGE: &str = "apama.analyticsbuilder";
/// The member marking an event as a block definition, in either spelling.
pub const BASE_MEMBER: &str = "$base";
const BLOCK_BASE_TYPE: &str = "BlockBase";
const QUALIFIED_BLOCK_BASE: &str = "apama.analyticsbuilder.BlockBase";
/// The platform's boxed value type; documented as plain `any`.
const BOXED_VALUE_TYPE: &str = "apama.analyticsbuilder.Value";

const PROCESS_ACTION: &str = "$process";
const PARAMETERS_SUFFIX: &str = "_$Parameters";
const INPUT_PREFIX: &str = "$input_";
const OUTPUT_PREFIX: &str = "$setOutput_";
const DEFAULT_VALUE_PREFIX: &str = "$DEFAULT_";
const INPUT_TYPE_PREFIX: &str = "$INPUT_TYPE_";
const OUTPUT_TYPE_PREFIX: &str = "$OUTPUT_TYPE_";
const BASE_INPUT_NAME_TAG: &str = "$inputName";

const BLOCK_CATEGORY_TAG: &str = "$blockCategory";
const BLOCK_TYPE_TAG: &str = "$blockType";
const DERIVED_NAME_TAG: &str = "$derivedName";
const TITLE_IS_DERIVED_TAG: &str = "$titleIsDerived";
const CONSUMES_INPUT_TAG: &str = "$consumesInput";
const PRODUCES_OUTPUT_TAG: &str = "$producesOutput";
const REPLACES_BLOCK_TAG: &str = "$replacesBlock";

/// The separator paragraphs of extended documentation are joined with.
const EXTENDED_DOC_JOINER: &str = "\n<p></p>\n";

/// Validates every tag in the tree, then assembles one [`Block`] per
/// block-defining event type, in document order.
///
/// An event matching the block shape but missing `$blockCategory` is logged
/// and excluded; an event outside a named package is fatal.
pub fn extract_blocks(tree: &DocumentTree) -> Result<Vec<Block>, ExtractionError> {
    validate_tags(tree)?;

    let mut blocks = Vec::new();
    for package in &tree.packages {
        for ty in package.types.iter().filter(|t| is_block_event(t)) {
            if !ty.has_tag(BLOCK_CATEGORY_TAG) {
                log::error!(
                    "A valid block must have a {BLOCK_CATEGORY_TAG} tag in its documentation. Event name = {}",
                    ty.name
                );
                continue;
            }
            let package_name = package.name.trim();
            if package_name.is_empty() {
                return Err(ExtractionError::MissingPackage {
                    event: ty.name.trim().to_string(),
                });
            }
            let block_id = format!("{package_name}.{}", ty.name.trim());
            blocks.push(build_block(block_id, ty, tree)?);
        }
    }
    Ok(blocks)
}

/// Whether an event type carries the block-identifying `$base` member, in
/// either the legacy or the fully qualified spelling.
fn is_block_event(ty: &TypeDefinition) -> bool {
    ty.is_event()
        && ty.members.iter().any(|m| {
            m.name.as_deref() == Some(BASE_MEMBER)
                && (m.member_type.as_deref() == Some(QUALIFIED_BLOCK_BASE)
                    || (m.member_type.as_deref() == Some(BLOCK_BASE_TYPE)
                        && m.package.as_deref() == Some(PLATFORM_PACKAGE)))
        })
}

fn build_block(
    block_id: String,
    ty: &TypeDefinition,
    tree: &DocumentTree,
) -> Result<Block, ExtractionError> {
    let mut ids = IdRegistry::default();
    let mut block = Block::new(block_id);

    block.category = ty.tag_text(BLOCK_CATEGORY_TAG).filter(|t| !t.is_empty());
    block.consumes_input = ty.has_tag(CONSUMES_INPUT_TAG);
    block.produces_output = ty.has_tag(PRODUCES_OUTPUT_TAG);
    block.block_type = ty.tag_text(BLOCK_TYPE_TAG).filter(|t| !t.is_empty());
    block.derived_name = ty.tag_text(DERIVED_NAME_TAG).filter(|t| !t.is_empty());
    block.title_is_derived = ty
        .tag_text(TITLE_IS_DERIVED_TAG)
        .is_some_and(|t| !t.is_empty() && t != "false");
    block.replaces_blocks = ty.tag_texts(REPLACES_BLOCK_TAG).collect();

    if let Some(text) = ty.description.as_deref() {
        let parsed = parse_description(text, true);
        block.name = parsed.name.filter(|n| !n.is_empty());
        block.description = parsed.description;
        block.extended_description = parsed.extended;
    }

    block.inputs = io::extract_inputs(ty, &mut ids)?;
    block.outputs = io::extract_outputs(ty, &mut ids)?;
    block.parameters = params::extract_parameters(ty, tree, &mut ids)?;

    Ok(block)
}

/// The per-block id namespace shared by inputs, outputs and parameters.
#[derive(Debug, Default)]
pub(crate) struct IdRegistry {
    names: AHashMap<String, &'static str>,
}

impl IdRegistry {
    /// Claims an id for the given element kind; a second claim of the same
    /// id is fatal and names both uses.
    fn claim(&mut self, name: &str, kind: &'static str) -> Result<(), ExtractionError> {
        if let Some(existing) = self.names.get(name) {
            return Err(ExtractionError::DuplicateId {
                name: name.to_string(),
                existing: existing.to_string(),
                requested: kind.to_string(),
            });
        }
        self.names.insert(name.to_string(), kind);
        Ok(())
    }
}

/// A doc comment split into the display name (first line, for elements that
/// carry one), the short description (next line), and the extended
/// documentation (everything after, paragraph-joined).
#[derive(Debug, Default)]
pub(crate) struct ParsedDescription {
    pub name: Option<String>,
    pub description: Option<String>,
    pub extended: Option<String>,
}

pub(crate) fn parse_description(text: &str, contains_name: bool) -> ParsedDescription {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim_matches(['\t', ' ']).is_empty())
        .map(|line| line.trim_matches(['\t', '"', ' ']))
        .collect();

    let (name, rest) = if contains_name && !lines.is_empty() {
        (Some(lines[0].trim_matches('.').to_string()), &lines[1..])
    } else {
        (None, &lines[..])
    };

    ParsedDescription {
        name,
        description: rest.first().map(|line| line.to_string()),
        extended: (rest.len() > 1).then(|| rest[1..].join(EXTENDED_DOC_JOINER)),
    }
}

/// Looks up a convention-named constant member and JSON-decodes its declared
/// literal. A present member with a missing or malformed literal is fatal.
pub(crate) fn find_default_value(
    ty: &TypeDefinition,
    field: &str,
) -> Result<Option<serde_json::Value>, ExtractionError> {
    let Some(member) = ty.member_named(field) else {
        return Ok(None);
    };
    let raw = member.type_value.as_deref().unwrap_or("");
    serde_json::from_str(raw)
        .map(Some)
        .map_err(|err| ExtractionError::MalformedValue {
            field: field.to_string(),
            message: err.to_string(),
        })
}

/// Like [`find_default_value`], but for type overrides, which must decode to
/// a JSON string.
pub(crate) fn string_override(
    ty: &TypeDefinition,
    field: &str,
) -> Result<Option<String>, ExtractionError> {
    match find_default_value(ty, field)? {
        None => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ExtractionError::NonStringTypeOverride {
            field: field.to_string(),
        }),
    }
}

/// Package-qualifies a declared type name.
pub(crate) fn qualified_type(package: Option<&str>, type_name: &str) -> String {
    let package = package.unwrap_or("").trim();
    if package.is_empty() {
        type_name.to_string()
    } else {
        format!("{package}.{type_name}")
    }
}

/// The boxed value type is `any` with properties; only `any` is documented.
pub(crate) fn documented_type(type_name: String) -> String {
    if type_name == BOXED_VALUE_TYPE {
        "any".to_string()
    } else {
        type_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_splits_name_short_and_extended() {
        let parsed = parse_description("Block Name.\nShort text.\nMore.\nEven more.", true);
        assert_eq!(parsed.name.as_deref(), Some("Block Name"));
        assert_eq!(parsed.description.as_deref(), Some("Short text."));
        assert_eq!(parsed.extended.as_deref(), Some("More.\n<p></p>\nEven more."));
    }

    #[test]
    fn description_without_name_keeps_the_first_line() {
        let parsed = parse_description("Short text.\nMore.", false);
        assert_eq!(parsed.name, None);
        assert_eq!(parsed.description.as_deref(), Some("Short text."));
        assert_eq!(parsed.extended.as_deref(), Some("More."));
    }

    #[test]
    fn description_drops_blank_lines_and_quote_padding() {
        let parsed = parse_description("\t\"Name.\"\n   \n\tBody.", true);
        assert_eq!(parsed.name.as_deref(), Some("Name"));
        assert_eq!(parsed.description.as_deref(), Some("Body."));
        assert_eq!(parsed.extended, None);
    }

    #[test]
    fn id_registry_rejects_a_second_claim() {
        let mut ids = IdRegistry::default();
        ids.claim("value", "input").unwrap();
        let err = ids.claim("value", "output").unwrap_err();
        assert_eq!(
            err,
            ExtractionError::DuplicateId {
                name: "value".to_string(),
                existing: "input".to_string(),
                requested: "output".to_string(),
            }
        );
    }

    #[test]
    fn qualified_type_skips_empty_packages() {
        assert_eq!(qualified_type(Some("pkg"), "Evt"), "pkg.Evt");
        assert_eq!(qualified_type(Some("  "), "Evt"), "Evt");
        assert_eq!(qualified_type(None, "float"), "float");
    }
}
