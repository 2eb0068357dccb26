//! Schema validation utilities.
//!
//! These checks guarantee that generated code is internally consistent:
//! unique variant names keep the visitor trait free of clashing methods, and
//! unique field identifiers keep every constructor assignment unambiguous.

use std::collections::HashSet;

use crate::error::SchemaError;
use crate::family::{FamilySpec, VariantSpec};
use crate::field::FieldSpec;
use crate::naming::{
    FORBIDDEN_IDENTIFIERS, is_identifier, is_reserved_field, is_type_name, module_name,
    setter_name, visit_method, visitor_trait,
};

/// Validates a family definition.
///
/// # Errors
/// Returns `SchemaError` describing the first problem found.
pub fn validate_family(family: &FamilySpec) -> Result<(), SchemaError> {
    if !is_type_name(&family.name)
        || FORBIDDEN_IDENTIFIERS.contains(&module_name(&family.name).as_str())
    {
        return Err(SchemaError::invalid_name("family", &family.name));
    }

    let shared = validate_shared_fields(family)?;

    let mut seen_variants = HashSet::new();
    let mut seen_methods = HashSet::new();
    for variant in &family.variants {
        if !is_type_name(&variant.name) {
            return Err(SchemaError::invalid_name("variant", &variant.name));
        }
        if variant.name == family.name || variant.name == visitor_trait(&family.name) {
            return Err(SchemaError::invalid_name("variant", &variant.name));
        }
        // `IoError` and `IOError` are distinct types but share a visitor method.
        if !seen_variants.insert(variant.name.as_str())
            || !seen_methods.insert(visit_method(&family.name, &variant.name))
        {
            return Err(SchemaError::DuplicateVariant {
                family: family.name.clone(),
                variant: variant.name.clone(),
            });
        }
        validate_variant_fields(family, variant, &shared)?;
    }

    Ok(())
}

/// Validates that shared field identifiers are unique among themselves.
fn validate_shared_fields(family: &FamilySpec) -> Result<HashSet<&str>, SchemaError> {
    let mut seen = HashSet::new();
    for field in &family.shared_fields {
        validate_identifier(field)?;
        if is_reserved_field(&field.identifier) {
            return Err(SchemaError::invalid_name("field", &field.identifier));
        }
        if !seen.insert(field.identifier.as_str()) {
            return Err(SchemaError::duplicate_field(
                &family.name,
                &family.name,
                &field.identifier,
            ));
        }
    }
    Ok(seen)
}

/// Validates fields within a variant against each other and the shared fields.
fn validate_variant_fields(
    family: &FamilySpec,
    variant: &VariantSpec,
    shared: &HashSet<&str>,
) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for field in &variant.fields {
        validate_identifier(field)?;
        let id = field.identifier.as_str();
        if shared.contains(id) || !seen.insert(id) {
            return Err(SchemaError::duplicate_field(
                &family.name,
                &variant.name,
                &field.identifier,
            ));
        }
    }

    // Getters share the field's name and setters are `set_<field>`, so both
    // must stay clear of each other and of the generated methods.
    for field in family.all_fields(variant) {
        if is_reserved_field(&field.identifier) {
            return Err(SchemaError::invalid_name("field", &field.identifier));
        }
        if field.mutable {
            let setter = setter_name(&field.identifier);
            if seen.contains(setter.as_str()) || shared.contains(setter.as_str()) {
                return Err(SchemaError::invalid_name("field", setter));
            }
        }
    }
    Ok(())
}

/// Checks identifiers of fields built directly rather than parsed.
fn validate_identifier(field: &FieldSpec) -> Result<(), SchemaError> {
    if !is_identifier(&field.identifier)
        || FORBIDDEN_IDENTIFIERS.contains(&field.identifier.as_str())
    {
        return Err(SchemaError::invalid_name("field", &field.identifier));
    }
    Ok(())
}
