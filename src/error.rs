//! Error types for csvbind
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Per-cell coercion failures are not errors in the default (lenient)
//! policy; they only surface as [`Error::Coerce`] when strict mode is on.

use thiserror::Error;

/// The main error type for csvbind
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Stream Errors
    // ============================================================================
    /// The stream is exhausted. A normal terminal signal, not a failure.
    #[error("End of input")]
    EndOfInput,

    #[error("Malformed row at line {line}: {message}")]
    MalformedRow { line: u64, message: String },

    #[error("Decoder is closed")]
    Closed,

    // ============================================================================
    // Schema Errors
    // ============================================================================
    #[error("Schema error: {message}")]
    Schema { message: String },

    #[error("Column '{column}' for field '{field}' not found in header")]
    MissingColumn { field: String, column: String },

    #[error("Field '{field}' expects {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Unknown field '{field}'")]
    UnknownField { field: String },

    // ============================================================================
    // Coercion Errors (strict mode only)
    // ============================================================================
    #[error("Cannot coerce '{value}' into {kind} for field '{field}': {message}")]
    Coerce {
        field: String,
        value: String,
        kind: String,
        message: String,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse shape YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a malformed row error
    pub fn malformed(line: u64, message: impl Into<String>) -> Self {
        Self::MalformedRow {
            line,
            message: message.into(),
        }
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an unknown field error
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// Whether this is the end-of-input signal rather than a failure
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Error::EndOfInput)
    }

    /// Whether the decoder can keep reading after this error
    ///
    /// Row-scoped failures leave the session usable; the next call reads
    /// the following row.
    pub fn is_row_scoped(&self) -> bool {
        matches!(
            self,
            Error::MalformedRow { .. }
                | Error::Coerce { .. }
                | Error::MissingColumn { .. }
                | Error::TypeMismatch { .. }
        )
    }
}

/// Result type alias for csvbind
pub type Result<T> = std::result::Result<T, Error>;
