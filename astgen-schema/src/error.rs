//! Error types for schema construction and validation.

use thiserror::Error;

/// Error type for schema registration and field descriptor parsing.
///
/// Every variant is raised while the schema is being built, before any
/// generated file is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A family with the same name is already registered.
    #[error("duplicate family definition: '{family}'")]
    DuplicateFamily {
        /// Family name.
        family: String,
    },

    /// Two variants of one family share a name.
    #[error("duplicate variant '{variant}' in family '{family}'")]
    DuplicateVariant {
        /// Family name.
        family: String,
        /// Variant name.
        variant: String,
    },

    /// A field identifier repeats within a variant or collides with a shared field.
    #[error("duplicate field '{field}' in variant '{family}.{variant}'")]
    DuplicateField {
        /// Family name.
        family: String,
        /// Variant name.
        variant: String,
        /// Field identifier.
        field: String,
    },

    /// A field descriptor could not be decomposed into type and identifier.
    #[error("malformed field descriptor '{descriptor}': {reason}")]
    MalformedField {
        /// The offending descriptor text.
        descriptor: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A family or variant name is not a valid type identifier.
    #[error("invalid {kind} name '{name}'")]
    InvalidName {
        /// Kind of name (family, variant, field).
        kind: &'static str,
        /// The offending name.
        name: String,
    },
}

impl SchemaError {
    /// Creates a malformed field error.
    pub fn malformed(descriptor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedField {
            descriptor: descriptor.into(),
            reason: reason.into(),
        }
    }

    /// Creates a duplicate field error.
    pub fn duplicate_field(
        family: impl Into<String>,
        variant: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self::DuplicateField {
            family: family.into(),
            variant: variant.into(),
            field: field.into(),
        }
    }

    /// Creates an invalid name error.
    pub fn invalid_name(kind: &'static str, name: impl Into<String>) -> Self {
        Self::InvalidName {
            kind,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_variant_display() {
        let err = SchemaError::DuplicateVariant {
            family: "Expr".to_string(),
            variant: "Binary".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate variant 'Binary' in family 'Expr'"
        );
    }

    #[test]
    fn test_malformed_helper() {
        let err = SchemaError::malformed("final Token", "missing identifier");
        assert!(matches!(err, SchemaError::MalformedField { .. }));
        assert!(err.to_string().contains("final Token"));
    }

    #[test]
    fn test_duplicate_field_display() {
        let err = SchemaError::duplicate_field("Stmt", "Var", "type");
        assert_eq!(err.to_string(), "duplicate field 'type' in variant 'Stmt.Var'");
    }
}
