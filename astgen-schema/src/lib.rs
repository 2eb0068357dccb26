//! # astgen Schema
//!
//! Declarative description of AST node families.
//!
//! This crate provides:
//! - Field descriptor parsing (`final Box<Expr> left`)
//! - Family and variant definitions
//! - A write-once schema registry
//! - Schema validation
//! - The naming rules shared by every code emitter

pub mod error;
pub mod family;
pub mod field;
pub mod naming;
pub mod registry;
pub mod validation;

pub use error::SchemaError;
pub use family::{FamilySpec, VariantSpec};
pub use field::{FieldSpec, IMMUTABLE_MARKER, parse_field, parse_fields};
pub use registry::SchemaRegistry;
pub use validation::validate_family;
