//! Error types for code generation.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema validation error.
    #[error("schema error: {0}")]
    Schema(#[from] astgen_schema::SchemaError),

    /// The destination could not be created or written.
    #[error("IO error at '{}': {source}", path.display())]
    Io {
        /// Path being created or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The assembled output is not valid Rust.
    #[error("generated code for family '{family}' does not parse: {message}")]
    InvalidOutput {
        /// Family name.
        family: String,
        /// Parser message.
        message: String,
    },
}

impl CodegenError {
    /// Creates an IO error for the given path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an invalid output error.
    pub fn invalid_output(family: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOutput {
            family: family.into(),
            message: message.into(),
        }
    }
}
