//! Error types for Mindwell core

use thiserror::Error;

/// Main error type for Mindwell operations
#[derive(Debug, Error)]
pub enum MindwellError {
    /// Malformed input (ValidationError)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A bounded field fell outside its declared range
    #[error("Field '{field}' out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        /// Field name
        field: String,
        /// Offending value, rendered
        value: String,
        /// Inclusive lower bound
        min: String,
        /// Inclusive upper bound
        max: String,
    },

    /// Missing required field
    #[error("Missing required field '{field}' in {context}. {suggestion}")]
    MissingField {
        /// Field name
        field: String,
        /// Context where field is missing
        context: String,
        /// Suggestion for fixing
        suggestion: String,
    },

    /// Requested subject does not exist (NotFoundError)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// History store failure
    #[error("Store error: {0}")]
    Store(String),

    /// Plugin-related error
    #[error("Plugin error: {0}")]
    Plugin(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Convenient Result type using MindwellError
pub type Result<T> = std::result::Result<T, MindwellError>;

impl MindwellError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        MindwellError::Validation(msg.into())
    }

    /// Create an out-of-range error for a bounded field
    pub fn out_of_range(
        field: impl Into<String>,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        MindwellError::OutOfRange {
            field: field.into(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(
        field: impl Into<String>,
        context: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        MindwellError::MissingField {
            field: field.into(),
            context: context.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        MindwellError::NotFound(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        MindwellError::Config(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        MindwellError::Store(msg.into())
    }

    /// Create a plugin error
    pub fn plugin(msg: impl Into<String>) -> Self {
        MindwellError::Plugin(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        MindwellError::Other(msg.into())
    }

    /// True for errors caused by a malformed submission
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MindwellError::Validation(_)
                | MindwellError::OutOfRange { .. }
                | MindwellError::MissingField { .. }
        )
    }

    /// True when the subject of the request was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, MindwellError::NotFound(_))
    }
}
