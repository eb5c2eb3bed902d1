//! Type resolution for members and parameters.
//!
//! A member's declared type may be wrapped in `optional<T>` or `sequence<T>`
//! (or `optional<sequence<T>>`); the wrappers appear as nested type-argument
//! elements rather than in the type string itself.

use crate::doc::Member;
use crate::error::ExtractionError;

/// The primitive types a block parameter may have. Anything else is excluded
/// from the parameter list (but still legal as an input/output type).
pub const SUPPORTED_PARAMETER_TYPES: [&str; 5] = ["integer", "float", "string", "any", "boolean"];

/// Markers for recognized compound sequence item types. A sequence of one of
/// these counts as supported so it can appear as a parameter, but it never
/// takes part in enum inference.
const COMPOUND_ITEM_MARKERS: [&str; 2] = ["NameValue", "LngLat"];

/// A member's declared type after unwrapping `optional` and `sequence`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// The nominal type name; `sequence<T>` for an unwrapped sequence.
    pub name: String,
    pub is_optional: bool,
    /// Whether the type may be used as a block parameter.
    pub is_supported: bool,
}

pub fn is_supported_type(name: &str) -> bool {
    SUPPORTED_PARAMETER_TYPES.contains(&name)
}

fn is_compound_item(name: &str) -> bool {
    COMPOUND_ITEM_MARKERS.iter().any(|m| name.contains(m))
}

/// Resolves a member's declared type. A missing `type` attribute, or a
/// missing type argument of an `optional`, is a fatal configuration error.
pub fn resolve_member_type(member: &Member) -> Result<ResolvedType, ExtractionError> {
    let missing = || ExtractionError::MissingParameterType {
        member: member.display_name().to_string(),
    };
    let declared = member.member_type.as_deref().ok_or_else(missing)?;

    if declared.eq_ignore_ascii_case("optional") {
        // optional<T>; T may itself be a sequence.
        let inner = member.type_parameter().ok_or_else(missing)?;
        let inner_type = inner.param_type.as_deref().ok_or_else(missing)?;
        if inner_type.eq_ignore_ascii_case("sequence") {
            if let Some(item_type) = inner
                .type_parameter()
                .and_then(|p| p.param_type.as_deref())
            {
                // optional<sequence<T>>: report the item type as nominal.
                return Ok(ResolvedType {
                    name: item_type.to_string(),
                    is_optional: true,
                    is_supported: is_compound_item(item_type),
                });
            }
        }
        Ok(ResolvedType {
            name: inner_type.to_string(),
            is_optional: true,
            is_supported: is_supported_type(inner_type),
        })
    } else if declared.eq_ignore_ascii_case("sequence") {
        let inner = member.type_parameter().ok_or_else(missing)?;
        let inner_type = inner.param_type.as_deref().ok_or_else(missing)?;
        let name = format!("sequence<{inner_type}>");
        let is_supported = is_compound_item(&name);
        Ok(ResolvedType {
            name,
            is_optional: false,
            is_supported,
        })
    } else {
        let name = declared.trim().to_string();
        let is_supported = is_supported_type(&name);
        Ok(ResolvedType {
            name,
            is_optional: false,
            is_supported,
        })
    }
}

/// The `<resolvedType>_<memberName>` key used for enum attribution; type and
/// name together are unique within one parameter-holder type.
pub fn type_underscore_name(member: &Member) -> Result<String, ExtractionError> {
    let resolved = resolve_member_type(member)?;
    let name = member.display_name().trim_matches(['\t', ' ']);
    Ok(format!("{}_{}", resolved.name, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::FormalParameter;

    fn member(declared: &str, args: Vec<FormalParameter>) -> Member {
        Member {
            name: Some("m".to_string()),
            member_type: Some(declared.to_string()),
            parameters: args,
            ..Member::default()
        }
    }

    fn type_arg(name: &str, nested: Vec<FormalParameter>) -> FormalParameter {
        FormalParameter {
            param_type: Some(name.to_string()),
            parameters: nested,
            ..FormalParameter::default()
        }
    }

    #[test]
    fn bare_primitive_is_supported() {
        let resolved = resolve_member_type(&member("float", vec![])).unwrap();
        assert_eq!(resolved.name, "float");
        assert!(!resolved.is_optional);
        assert!(resolved.is_supported);
    }

    #[test]
    fn bare_event_type_is_unsupported() {
        let resolved = resolve_member_type(&member("my.Event", vec![])).unwrap();
        assert!(!resolved.is_supported);
    }

    #[test]
    fn optional_unwraps_to_inner_type() {
        let m = member("optional", vec![type_arg("string", vec![])]);
        let resolved = resolve_member_type(&m).unwrap();
        assert_eq!(resolved.name, "string");
        assert!(resolved.is_optional);
        assert!(resolved.is_supported);
    }

    #[test]
    fn optional_sequence_reports_item_type() {
        let m = member(
            "optional",
            vec![type_arg("sequence", vec![type_arg("float", vec![])])],
        );
        let resolved = resolve_member_type(&m).unwrap();
        assert_eq!(resolved.name, "float");
        assert!(resolved.is_optional);
        // plain item types are not compound, so no enum inference applies
        assert!(!resolved.is_supported);
    }

    #[test]
    fn optional_sequence_of_compound_item_is_supported() {
        let m = member(
            "optional",
            vec![type_arg("sequence", vec![type_arg("my.NameValue", vec![])])],
        );
        let resolved = resolve_member_type(&m).unwrap();
        assert_eq!(resolved.name, "my.NameValue");
        assert!(resolved.is_supported);
    }

    #[test]
    fn bare_sequence_keeps_the_wrapper_in_the_name() {
        let m = member("sequence", vec![type_arg("string", vec![])]);
        let resolved = resolve_member_type(&m).unwrap();
        assert_eq!(resolved.name, "sequence<string>");
        assert!(!resolved.is_optional);
        assert!(!resolved.is_supported);
    }

    #[test]
    fn missing_type_attribute_is_fatal() {
        let m = Member {
            name: Some("m".to_string()),
            ..Member::default()
        };
        assert!(matches!(
            resolve_member_type(&m),
            Err(ExtractionError::MissingParameterType { .. })
        ));
    }

    #[test]
    fn optional_without_type_argument_is_fatal() {
        let m = member("optional", vec![]);
        assert!(matches!(
            resolve_member_type(&m),
            Err(ExtractionError::MissingParameterType { .. })
        ));
    }

    #[test]
    fn key_joins_resolved_type_and_name() {
        let m = Member {
            name: Some("mode".to_string()),
            member_type: Some("string".to_string()),
            ..Member::default()
        };
        assert_eq!(type_underscore_name(&m).unwrap(), "string_mode");
    }
}
