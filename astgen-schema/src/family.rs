//! Family and variant definitions.
//!
//! A family is a closed set of node variants sharing one base type and one
//! visitor trait, e.g. `Expr` or `Stmt`.

use crate::error::SchemaError;
use crate::field::{FieldSpec, parse_fields};

/// Variant definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSpec {
    /// Variant name, unique within its family.
    pub name: String,
    /// Variant-specific fields in declaration order.
    pub fields: Vec<FieldSpec>,
}

impl VariantSpec {
    /// Creates a new variant definition.
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Creates a variant from field descriptors such as `final Token name`.
    ///
    /// # Errors
    /// Returns `SchemaError::MalformedField` for the first bad descriptor.
    pub fn parse(name: impl Into<String>, descriptors: &[&str]) -> Result<Self, SchemaError> {
        Ok(Self::new(name, parse_fields(descriptors)?))
    }
}

/// Family definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilySpec {
    /// Family name.
    pub name: String,
    /// Variants in registration order.
    pub variants: Vec<VariantSpec>,
    /// Fields declared once on the base and appended to every variant.
    pub shared_fields: Vec<FieldSpec>,
}

impl FamilySpec {
    /// Creates a new family definition.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        variants: Vec<VariantSpec>,
        shared_fields: Vec<FieldSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            variants,
            shared_fields,
        }
    }

    /// Returns the full field list of a variant: its own fields, then the
    /// family's shared fields.
    pub fn all_fields<'a>(&'a self, variant: &'a VariantSpec) -> impl Iterator<Item = &'a FieldSpec> {
        variant.fields.iter().chain(self.shared_fields.iter())
    }

    /// Looks up a variant by name.
    #[must_use]
    pub fn get_variant(&self, name: &str) -> Option<&VariantSpec> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Returns true if the family declares shared fields.
    #[must_use]
    pub fn has_shared_fields(&self) -> bool {
        !self.shared_fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmt_family() -> FamilySpec {
        FamilySpec::new(
            "Stmt",
            vec![
                VariantSpec::parse("Var", &["final Expr.Symbol identifier", "final Expr expression"])
                    .unwrap(),
                VariantSpec::parse("Print", &["final Expr expression"]).unwrap(),
            ],
            vec![FieldSpec::mutable("Option<LoxType>", "type")],
        )
    }

    #[test]
    fn test_all_fields_appends_shared() {
        let family = stmt_family();
        let var = family.get_variant("Var").unwrap();
        let names: Vec<_> = family.all_fields(var).map(|f| f.identifier.as_str()).collect();
        assert_eq!(names, ["identifier", "expression", "type"]);
    }

    #[test]
    fn test_get_variant_missing() {
        assert!(stmt_family().get_variant("While").is_none());
    }

    #[test]
    fn test_variant_parse_propagates_malformed() {
        let result = VariantSpec::parse("Bad", &["final Token"]);
        assert!(matches!(result, Err(SchemaError::MalformedField { .. })));
    }

    #[test]
    fn test_has_shared_fields() {
        assert!(stmt_family().has_shared_fields());
        assert!(!FamilySpec::new("Expr", Vec::new(), Vec::new()).has_shared_fields());
    }
}
