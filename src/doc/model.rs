//! The typed document-tree model.
//!
//! This is the canonical in-memory form of the externally generated
//! documentation XML. It is built once by [`super::parser`] and read-only
//! afterwards; the extraction passes navigate it through the typed accessors
//! below instead of path queries.

/// The whole documentation tree: every package found under the XML root,
/// in document order.
#[derive(Debug, Clone, Default)]
pub struct DocumentTree {
    pub packages: Vec<Package>,
}

/// One package of type definitions.
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    pub types: Vec<TypeDefinition>,
}

/// A type definition (event, struct, ...) inside a package.
#[derive(Debug, Clone, Default)]
pub struct TypeDefinition {
    pub name: String,
    /// The `category` attribute; `"Event"` marks event kinds.
    pub category: String,
    pub description: Option<String>,
    pub dollar_fields: Vec<DollarField>,
    pub members: Vec<Member>,
    pub actions: Vec<Action>,
}

/// A member (field or constant) of a type definition.
#[derive(Debug, Clone, Default)]
pub struct Member {
    pub name: Option<String>,
    pub member_type: Option<String>,
    pub package: Option<String>,
    /// The declared literal for constants, still JSON-encoded.
    pub type_value: Option<String>,
    pub constant: bool,
    pub description: Option<String>,
    pub dollar_fields: Vec<DollarField>,
    /// Nested `Parameters/Parameter` children. For generic members these are
    /// the type arguments (`optional<T>`, `sequence<T>`); for `action`-typed
    /// members they are the action's formal parameters.
    pub parameters: Vec<FormalParameter>,
}

/// An action declared on a type definition.
#[derive(Debug, Clone, Default)]
pub struct Action {
    pub name: Option<String>,
    pub parameters: Vec<FormalParameter>,
    pub dollar_fields: Vec<DollarField>,
}

/// A formal parameter or generic type argument, recursively nested.
#[derive(Debug, Clone, Default)]
pub struct FormalParameter {
    pub name: Option<String>,
    pub param_type: Option<String>,
    pub package: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<FormalParameter>,
}

/// A semantic annotation (`$...` tag) lifted out of a doc comment.
#[derive(Debug, Clone)]
pub struct DollarField {
    pub name: String,
    pub description: Option<String>,
}

impl DocumentTree {
    /// Finds an event-kind type definition by package and type name.
    pub fn find_event_type(&self, package: &str, type_name: &str) -> Option<&TypeDefinition> {
        self.packages
            .iter()
            .find(|p| p.name == package)?
            .types
            .iter()
            .find(|t| t.is_event() && t.name == type_name)
    }
}

impl TypeDefinition {
    pub fn is_event(&self) -> bool {
        self.category == "Event"
    }

    /// Members that carry a `name` attribute, in document order.
    pub fn named_members(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.members
            .iter()
            .filter_map(|m| m.name.as_deref().map(|n| (n, m)))
    }

    /// First member with the given declared type, if any.
    pub fn member_of_type(&self, member_type: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| m.member_type.as_deref() == Some(member_type))
    }

    /// First member with the given name, if any.
    pub fn member_named(&self, name: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| m.name.as_deref() == Some(name))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.dollar_fields.iter().any(|f| f.name == tag)
    }

    /// Trimmed description text of the first tag with the given name.
    pub fn tag_text(&self, tag: &str) -> Option<String> {
        tag_text(&self.dollar_fields, tag)
    }

    /// Trimmed description texts of every tag with the given name.
    pub fn tag_texts<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = String> + 'a {
        self.dollar_fields
            .iter()
            .filter(move |f| f.name == tag)
            .filter_map(|f| f.description.as_deref())
            .map(|d| d.trim().to_string())
    }
}

impl Member {
    /// The member's name for diagnostics, falling back to `<unnamed>`.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// First nested type argument that carries a `type` attribute.
    pub fn type_parameter(&self) -> Option<&FormalParameter> {
        self.parameters.iter().find(|p| p.param_type.is_some())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.dollar_fields.iter().any(|f| f.name == tag)
    }

    pub fn tag_text(&self, tag: &str) -> Option<String> {
        tag_text(&self.dollar_fields, tag)
    }
}

impl FormalParameter {
    /// First nested type argument that carries a `type` attribute.
    pub fn type_parameter(&self) -> Option<&FormalParameter> {
        self.parameters.iter().find(|p| p.param_type.is_some())
    }
}

fn tag_text(fields: &[DollarField], tag: &str) -> Option<String> {
    fields
        .iter()
        .find(|f| f.name == tag)?
        .description
        .as_deref()
        .map(|d| d.trim().to_string())
}
