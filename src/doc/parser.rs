//! Conversion from the generated XML into the typed document tree.

use std::fs;
use std::path::Path;

use crate::error::DocumentError;

use super::model::{
    Action, DocumentTree, DollarField, FormalParameter, Member, Package, TypeDefinition,
};

impl DocumentTree {
    /// Reads and parses a documentation file.
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let xml = fs::read_to_string(path)?;
        Self::parse(&xml)
    }

    /// Parses the documentation XML into the typed tree. Unknown elements
    /// are ignored.
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let doc = roxmltree::Document::parse(xml)?;
        let packages = elements(doc.root_element(), "Package")
            .map(parse_package)
            .collect();
        Ok(DocumentTree { packages })
    }
}

fn parse_package(node: roxmltree::Node) -> Package {
    Package {
        name: attr(node, "name").unwrap_or_default(),
        types: elements(node, "Type").map(parse_type).collect(),
    }
}

fn parse_type(node: roxmltree::Node) -> TypeDefinition {
    TypeDefinition {
        name: attr(node, "name").unwrap_or_default(),
        category: attr(node, "category").unwrap_or_default(),
        description: description_text(node),
        dollar_fields: parse_dollar_fields(node),
        members: elements(node, "Member").map(parse_member).collect(),
        actions: elements(node, "Action").map(parse_action).collect(),
    }
}

fn parse_member(node: roxmltree::Node) -> Member {
    Member {
        name: attr(node, "name"),
        member_type: attr(node, "type"),
        package: attr(node, "package"),
        type_value: attr(node, "typeValue"),
        constant: node.has_attribute("constant"),
        description: description_text(node),
        dollar_fields: parse_dollar_fields(node),
        parameters: parse_parameters(node),
    }
}

fn parse_action(node: roxmltree::Node) -> Action {
    Action {
        name: attr(node, "name"),
        parameters: parse_parameters(node),
        dollar_fields: parse_dollar_fields(node),
    }
}

fn parse_formal_parameter(node: roxmltree::Node) -> FormalParameter {
    FormalParameter {
        name: attr(node, "name"),
        param_type: attr(node, "type"),
        package: attr(node, "package"),
        description: description_text(node),
        parameters: parse_parameters(node),
    }
}

/// Children of the node's `Parameters` wrapper element, if present.
fn parse_parameters(node: roxmltree::Node) -> Vec<FormalParameter> {
    element(node, "Parameters")
        .map(|wrapper| {
            elements(wrapper, "Parameter")
                .map(parse_formal_parameter)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_dollar_fields(node: roxmltree::Node) -> Vec<DollarField> {
    element(node, "DollarFields")
        .map(|wrapper| {
            elements(wrapper, "DollarField")
                .filter_map(|f| {
                    Some(DollarField {
                        name: attr(f, "name")?.trim().to_string(),
                        description: description_text(f),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Text of the node's `Description` child. An empty `<Description/>` yields
/// an empty string; a missing element yields `None`.
fn description_text(node: roxmltree::Node) -> Option<String> {
    element(node, "Description").map(|d| d.text().unwrap_or_default().to_string())
}

fn attr(node: roxmltree::Node, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_string)
}

fn element<'a>(node: roxmltree::Node<'a, 'a>, tag: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == tag)
}

fn elements<'a>(
    node: roxmltree::Node<'a, 'a>,
    tag: &'a str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'a>> + 'a {
    node.children()
        .filter(move |c| c.is_element() && c.tag_name().name() == tag)
}
