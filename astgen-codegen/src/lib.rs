//! # astgen Codegen
//!
//! Rust code generation from astgen schemas.
//!
//! This crate provides:
//! - One module file per node family: base enum, node structs, visitor trait
//! - Constructor generation with optional prefix overloads
//! - Shared helpers such as a `Display` formatter wired into every node
//! - Staged writing of the generated files

pub mod config;
pub mod error;
pub mod generator;
pub mod helper;
pub mod rust;

use std::path::{Path, PathBuf};

use astgen_schema::SchemaRegistry;

pub use config::{ConstructorPolicy, GeneratorConfig};
pub use error::CodegenError;
pub use generator::{GeneratedFile, Generator};
pub use helper::{DisplayHelper, SharedHelper};

/// Generates Rust code for every family of a schema.
///
/// # Arguments
/// * `schema` - Fully registered schema
/// * `config` - Generator configuration
///
/// # Returns
/// One rendered file per family, in registration order.
///
/// # Errors
/// Returns `CodegenError` if validation or generation fails.
pub fn generate(
    schema: &SchemaRegistry,
    config: GeneratorConfig,
) -> Result<Vec<GeneratedFile>, CodegenError> {
    Generator::new(schema, config).generate_all()
}

/// Generates Rust code for every family of a schema and writes it to a directory.
///
/// # Arguments
/// * `schema` - Fully registered schema
/// * `config` - Generator configuration
/// * `destination` - Output directory, created if missing
///
/// # Returns
/// The paths written.
///
/// # Errors
/// Returns `CodegenError` if validation, generation or writing fails.
pub fn generate_to_dir(
    schema: &SchemaRegistry,
    config: GeneratorConfig,
    destination: &Path,
) -> Result<Vec<PathBuf>, CodegenError> {
    Generator::new(schema, config).write_all(destination)
}
