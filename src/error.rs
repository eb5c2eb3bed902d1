use thiserror::Error;

/// Errors that can occur while loading and parsing the documentation tree.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read the documentation file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse the documentation XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Fatal conditions found during metadata extraction. Any of these aborts the
/// whole run; recoverable per-element problems are logged and skipped instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("Parameter type is missing for '{member}'")]
    MissingParameterType { member: String },

    #[error("Duplicate name '{name}' used as {existing} and {requested}")]
    DuplicateId {
        name: String,
        existing: String,
        requested: String,
    },

    #[error("Invalid tag present in the monitor file. Error = {0}")]
    InvalidTagPlacement(String),

    #[error("Multiple tags {tag} are present in the block")]
    DuplicateTag { tag: String },

    #[error(
        "Event definition for block should be defined inside a package. Package name is missing for event '{event}'"
    )]
    MissingPackage { event: String },

    #[error("Malformed value for '{field}': {message}")]
    MalformedValue { field: String, message: String },

    #[error("Type override '{field}' must be a JSON string")]
    NonStringTypeOverride { field: String },

    #[error("Tag '$minNumEntries' on '{member}' is not numeric: '{value}'")]
    NonNumericTag { member: String, value: String },
}
