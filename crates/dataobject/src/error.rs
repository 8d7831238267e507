//! Error types for the dataobject library.

use thiserror::Error;

/// Main error type for container and builder operations.
#[derive(Debug, Error)]
pub enum DataObjectError {
    /// An associative map was found nested inside object-shaped input.
    #[error("associative map found within object-shaped input at key '{key}'")]
    AssociativeWithinObject { key: String },

    /// An object-shaped value was found nested inside associative input.
    #[error("object-shaped value found within associative input at key '{key}'")]
    ObjectWithinAssociative { key: String },

    /// The builder was given a root node of the wrong shape.
    #[error("builder input must be {expected}, {actual} given")]
    UnsupportedRoot {
        expected: &'static str,
        actual: &'static str,
    },

    /// A typed array read found a non-conforming element.
    #[error("array index {index} must be of type {expected}, {actual} given")]
    ArrayElementType {
        index: usize,
        expected: String,
        actual: String,
    },

    /// A typed array read was requested with an unknown type name.
    #[error("invalid type: '{0}' is neither a primitive nor a known type")]
    InvalidTypeName(String),

    /// A value could not be interpreted as a date-time.
    #[error("cannot interpret {0} as a date-time")]
    DateTimeCoercion(String),

    /// An attempt was made to write to a read-only structure.
    #[error("structure is read-only and cannot be written to")]
    ImmutableWrite,

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for dataobject operations.
pub type Result<T> = std::result::Result<T, DataObjectError>;
