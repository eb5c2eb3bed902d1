//! The documentation tree: typed model plus XML parser.

mod model;
mod parser;

pub use model::{
    Action, DocumentTree, DollarField, FormalParameter, Member, Package, TypeDefinition,
};
