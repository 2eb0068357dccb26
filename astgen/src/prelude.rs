//! Prelude module for convenient imports.
//!
//! ```ignore
//! use astgen::prelude::*;
//! ```

// Schema types
pub use astgen_schema::{
    FamilySpec, FieldSpec, IMMUTABLE_MARKER, SchemaError, SchemaRegistry, VariantSpec,
    parse_field, parse_fields,
};

// Codegen types
pub use astgen_codegen::{
    CodegenError, ConstructorPolicy, DisplayHelper, GeneratedFile, Generator, GeneratorConfig,
    SharedHelper,
};
