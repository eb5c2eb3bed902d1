//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions so callers can pull
//! in the whole pipeline with a single `use blockmeta::prelude::*;`.

// Document tree
pub use crate::doc::DocumentTree;

// Extraction pipeline
pub use crate::extract::{extract_blocks, validate_tags};

// Output model and serialization
pub use crate::metadata::{
    Block, EnumValue, IoDescriptor, MetadataDocument, Parameter, extract_messages,
};

// Error types
pub use crate::error::{DocumentError, ExtractionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
