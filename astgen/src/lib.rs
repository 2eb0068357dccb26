//! # astgen
//!
//! Schema-driven generator for strongly-typed AST node definitions.
//!
//! A schema lists node families (`Expr`, `Stmt`), their variants and the
//! fields of each variant. For every family astgen writes one Rust module
//! containing a base enum, one struct per variant with constructors and
//! accessors, and a visitor trait with one required method per variant.
//!
//! ## Quick Start
//!
//! ```ignore
//! use astgen::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut schema = SchemaRegistry::new();
//! schema.register(
//!     "Expr",
//!     vec![VariantSpec::parse("Literal", &["final Value value"])?],
//!     Vec::new(),
//! )?;
//!
//! Generator::new(&schema, GeneratorConfig::new())
//!     .write_all(std::path::Path::new("src/ast"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Schema registry, field descriptors and validation
//! - [`codegen`] - Rust code generation and writing
//! - [`lox`] - Built-in Lox grammar used by the `astgen` binary

pub mod lox;
pub mod prelude;

/// Schema registry, field descriptors and validation.
pub mod schema {
    pub use astgen_schema::*;
}

/// Rust code generation from schemas.
pub mod codegen {
    pub use astgen_codegen::*;
}
