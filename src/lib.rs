//! # Blockmeta - Block Metadata Extraction
//!
//! **Blockmeta** reads the documentation XML tree generated for an
//! event-processing platform's plugin ("block") sources and produces the
//! canonical metadata consumed by the platform's UI and registry: one JSON
//! document describing every block's inputs, outputs and parameters, plus a
//! flat message table used to localize all human-readable strings.
//!
//! ## Core Workflow
//!
//! 1. **Parse**: load the generated XML into the typed, read-only
//!    [`doc::DocumentTree`] model.
//! 2. **Validate**: a single pass checks every `$...` documentation tag
//!    against its legal placement before anything is extracted.
//! 3. **Extract**: [`extract::extract_blocks`] assembles one
//!    [`metadata::Block`] per block-defining event type, resolving types,
//!    matching enumerated constants to their parameters, and registering
//!    every id in a per-block namespace.
//! 4. **Serialize**: [`metadata::MetadataDocument`] emits canonical
//!    (sorted-key, stable-indent) JSON, and
//!    [`metadata::extract_messages`] flattens the display strings into the
//!    localization table.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blockmeta::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let xml = std::fs::read_to_string("apamadoc/structure.xml")?;
//!     let tree = DocumentTree::parse(&xml)?;
//!
//!     let blocks = extract_blocks(&tree)?;
//!     let document = MetadataDocument::new("10.0.0", blocks);
//!
//!     println!("{}", document.to_canonical_json()?);
//!     for (id, text) in extract_messages(&document)? {
//!         println!("{id} = {text}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Fatal conditions (illegal tag placement, duplicate ids, missing type
//! attributes) abort extraction with a descriptive
//! [`error::ExtractionError`]; malformed single elements are logged through
//! the `log` facade and skipped so one bad element cannot suppress the rest
//! of a block or document.

pub mod doc;
pub mod error;
pub mod extract;
pub mod metadata;
pub mod prelude;
