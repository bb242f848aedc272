use crate::schema::FieldType;
use thiserror::Error;

/// Main error type for mapping resolution
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Conflicting definitions for field `{path}`: {first} vs {second}")]
    ConflictingDefinition {
        path: String,
        first: FieldType,
        second: FieldType,
    },

    #[error("Invalid alias `{alias}`: {reason}")]
    InvalidAlias { alias: String, reason: AliasError },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why an alias declaration was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AliasError {
    #[error("missing target path")]
    MissingTarget,

    #[error("alias refers to itself")]
    SelfReference,

    #[error("target `{target}` does not exist")]
    TargetNotFound { target: String },

    #[error("target `{target}` has conflicting definitions: {first} vs {second}")]
    ConflictingTarget {
        target: String,
        first: FieldType,
        second: FieldType,
    },
}

/// Result type alias for mapping operations
pub type Result<T> = std::result::Result<T, MappingError>;

impl MappingError {
    /// Errors that make the whole mapping unusable
    pub fn is_schema_error(&self) -> bool {
        matches!(self, MappingError::InvalidAlias { .. })
    }

    /// Error raised when one path resolves to disagreeing definitions
    pub fn is_conflict(&self) -> bool {
        matches!(self, MappingError::ConflictingDefinition { .. })
    }
}
