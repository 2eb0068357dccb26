//! Schema registry.
//!
//! The registry is write-once per family and read-many during generation.
//! Families are kept in registration order so generated output is
//! deterministic.

use std::collections::HashMap;

use crate::error::SchemaError;
use crate::family::{FamilySpec, VariantSpec};
use crate::field::FieldSpec;
use crate::naming::module_name;
use crate::validation::validate_family;

/// Complete set of families to generate.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    /// Families in registration order.
    families: Vec<FamilySpec>,
    /// Family lookup map.
    index: HashMap<String, usize>,
}

impl SchemaRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a family.
    ///
    /// # Arguments
    /// * `family` - Family name, e.g. `Expr`
    /// * `variants` - Variants in the order they should be emitted
    /// * `shared_fields` - Fields appended to every variant
    ///
    /// # Errors
    /// Returns `SchemaError` if the family is already registered, a variant
    /// name repeats or reuses a family name, or a field identifier collides
    /// within a variant.
    pub fn register(
        &mut self,
        family: impl Into<String>,
        variants: Vec<VariantSpec>,
        shared_fields: Vec<FieldSpec>,
    ) -> Result<(), SchemaError> {
        let spec = FamilySpec::new(family, variants, shared_fields);

        if self.index.contains_key(&spec.name) {
            return Err(SchemaError::DuplicateFamily { family: spec.name });
        }
        validate_family(&spec)?;
        check_against_families(&spec, &self.families)?;

        tracing::debug!(
            family = %spec.name,
            variants = spec.variants.len(),
            shared_fields = spec.shared_fields.len(),
            "registered family"
        );

        self.index.insert(spec.name.clone(), self.families.len());
        self.families.push(spec);
        Ok(())
    }

    /// Returns every family in registration order.
    #[must_use]
    pub fn all(&self) -> &[FamilySpec] {
        &self.families
    }

    /// Looks up a family by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FamilySpec> {
        self.index.get(name).map(|&idx| &self.families[idx])
    }

    /// Returns true if a family with the given name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the number of registered families.
    #[must_use]
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Returns true if no family is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Re-validates every registered family.
    ///
    /// # Errors
    /// Returns the first `SchemaError` found.
    pub fn validate(&self) -> Result<(), SchemaError> {
        self.families.iter().try_for_each(validate_family)?;
        for (idx, family) in self.families.iter().enumerate() {
            check_against_families(family, &self.families[..idx])?;
        }
        Ok(())
    }
}

/// Checks `family` against the families registered before it.
///
/// Family files import each other's base types and are mounted as sibling
/// modules, so a variant may not reuse a family name and two families may
/// not map to the same module.
fn check_against_families(family: &FamilySpec, others: &[FamilySpec]) -> Result<(), SchemaError> {
    let module = module_name(&family.name);
    for other in others {
        if module_name(&other.name) == module {
            return Err(SchemaError::DuplicateFamily {
                family: family.name.clone(),
            });
        }
        let clash = family
            .variants
            .iter()
            .find(|v| v.name == other.name)
            .or_else(|| other.variants.iter().find(|v| v.name == family.name));
        if let Some(variant) = clash {
            return Err(SchemaError::invalid_name("variant", &variant.name));
        }
    }
    Ok(())
}
