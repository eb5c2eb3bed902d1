//! Validation of `$...` tag names and their placement.
//!
//! Runs once over the whole tree before any extraction. Each tag is legal on
//! exactly one kind of node: block-level tags on a block-identifying event,
//! `$inputName` on the `$process` action, field-level tags on a member.

use ahash::AHashSet;

use crate::doc::{DocumentTree, DollarField, TypeDefinition};
use crate::error::ExtractionError;

/// Block-level tags that may appear at most once per type.
pub const SINGLE_BLOCK_TAGS: [&str; 4] = [
    "$blockCategory",
    "$blockType",
    "$derivedName",
    "$titleIsDerived",
];

/// Block-level tags that may repeat.
pub const REPEATABLE_BLOCK_TAGS: [&str; 3] = ["$replacesBlock", "$consumesInput", "$producesOutput"];

/// Tags legal on a member.
pub const FIELD_TAGS: [&str; 6] = [
    "$semanticType",
    "$displayType",
    "$minNumEntries",
    "$optional",
    "$displayHeaderName",
    "$displayHeaderValue",
];

/// The node a tag was found on, for placement checks and error messages.
#[derive(Debug, Clone, Copy)]
enum TagSite<'a> {
    Type(&'a TypeDefinition),
    Action {
        name: Option<&'a str>,
        event: &'a TypeDefinition,
    },
    Member {
        name: Option<&'a str>,
        event: &'a TypeDefinition,
    },
}

impl<'a> TagSite<'a> {
    fn parent_name(&self) -> Option<&'a str> {
        match self {
            TagSite::Type(ty) => Some(ty.name.as_str()),
            TagSite::Action { name, .. } | TagSite::Member { name, .. } => *name,
        }
    }

    fn grandparent_name(&self) -> Option<&'a str> {
        match self {
            TagSite::Type(_) => None,
            TagSite::Action { event, .. } | TagSite::Member { event, .. } => {
                Some(event.name.as_str())
            }
        }
    }
}

/// Checks every tag in the tree against its legal placement. The first
/// violation aborts the run.
pub fn validate_tags(tree: &DocumentTree) -> Result<(), ExtractionError> {
    for package in &tree.packages {
        for ty in &package.types {
            let mut seen: AHashSet<&str> = AHashSet::new();
            for field in &ty.dollar_fields {
                let tag = field.name.as_str();
                if SINGLE_BLOCK_TAGS.contains(&tag) && !seen.insert(tag) {
                    return Err(ExtractionError::DuplicateTag {
                        tag: tag.to_string(),
                    });
                }
                validate_tag(TagSite::Type(ty), field)?;
            }

            for action in &ty.actions {
                let site = TagSite::Action {
                    name: action.name.as_deref(),
                    event: ty,
                };
                for field in &action.dollar_fields {
                    validate_tag(site, field)?;
                }
            }

            for member in &ty.members {
                let site = TagSite::Member {
                    name: member.name.as_deref(),
                    event: ty,
                };
                for field in &member.dollar_fields {
                    validate_tag(site, field)?;
                }
            }
        }
    }
    Ok(())
}

fn validate_tag(site: TagSite, field: &DollarField) -> Result<(), ExtractionError> {
    let tag = field.name.as_str();
    if SINGLE_BLOCK_TAGS.contains(&tag) || REPEATABLE_BLOCK_TAGS.contains(&tag) {
        // Legal only on a block event carrying the identifying `$base` member.
        let on_block_event = matches!(site, TagSite::Type(ty)
            if ty.is_event() && ty.member_named("$base").is_some());
        if !on_block_event {
            return Err(placement_error(
                site,
                field,
                "This is only valid on a block event which has a member '$base'.",
            ));
        }
    } else if tag == "$inputName" {
        let on_process = matches!(site, TagSite::Action { name: Some("$process"), .. });
        if !on_process {
            return Err(placement_error(
                site,
                field,
                "This is only valid on a $process action.",
            ));
        }
    } else if FIELD_TAGS.contains(&tag) {
        if !matches!(site, TagSite::Member { .. }) {
            return Err(placement_error(
                site,
                field,
                "This is only valid on an event field.",
            ));
        }
    } else {
        return Err(placement_error(site, field, ""));
    }
    Ok(())
}

/// Builds the fatal message naming the tag, its parent, its grandparent and
/// its description text, in the combinations that are actually present.
fn placement_error(site: TagSite, field: &DollarField, hint: &str) -> ExtractionError {
    let tag = &field.name;
    let parent = site.parent_name().unwrap_or("<unnamed>");
    let description = field
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    let mut message = match (description, site.grandparent_name()) {
        (Some(desc), Some(event)) => format!(
            "'{tag}' tag with description '{desc}' present on '{parent}' inside the event '{event}' is not valid."
        ),
        (Some(desc), None) => {
            format!("'{tag}' tag with description '{desc}' present on '{parent}' is not valid.")
        }
        (None, Some(event)) => {
            format!("'{tag}' tag present on '{parent}' inside the event '{event}' is not valid.")
        }
        (None, None) => format!("'{tag}' tag present on '{parent}' is not valid."),
    };
    if !hint.is_empty() {
        message.push(' ');
        message.push_str(hint);
    }
    ExtractionError::InvalidTagPlacement(message)
}
