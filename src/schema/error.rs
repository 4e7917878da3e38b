//! Error types for JSON Schema generation

use thiserror::Error;

/// Errors that can occur while building or encoding a schema
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Unsupported type {0}")]
    UnsupportedWireType(String),

    #[error("Cannot derive schema for {shape}: {reason}")]
    SchemaDerivation { shape: String, reason: String },

    #[error("Failed to encode schema: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Invalid object description: {0}")]
    InvalidDescription(#[source] serde_json::Error),
}

impl SchemaError {
    pub(crate) fn derivation(shape: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::SchemaDerivation {
            shape: shape.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
