// Error types for attribute assignment

use thiserror::Error;

/// Result type alias using [`AttrError`].
pub type Result<T> = std::result::Result<T, AttrError>;

/// Errors raised while configuring or materialising an attribute specification.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttrError {
    /// Requested grouping columns are not part of the dataset schema.
    #[error("Invalid columns {columns:?}; available columns: {available:?}")]
    InvalidColumns {
        columns: Vec<String>,
        available: Vec<String>,
    },

    /// A cyclic value pool was empty when a mapping had to be built.
    #[error("Value pool for attribute '{attribute}' is empty")]
    EmptyPool { attribute: String },

    /// The group extractor and the map builder disagree about a group key.
    #[error("Internal consistency error for group {key}: {detail}")]
    InternalConsistency { key: String, detail: String },

    /// An explicit group key does not have one value per grouping column.
    #[error("Group {key} has {found} values but {expected} grouping columns are configured")]
    ItemArity {
        key: String,
        expected: usize,
        found: usize,
    },

    /// A palette was requested by a name that is not registered.
    #[error("Unknown palette '{0}'")]
    UnknownPalette(String),
}
