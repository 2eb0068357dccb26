//! Visitor trait code generation.

use astgen_schema::FamilySpec;
use astgen_schema::naming::{escape_ident, module_name, visit_method, visitor_trait};

/// Generator for a family's visitor trait.
pub struct VisitorGenerator<'a> {
    family: &'a FamilySpec,
}

impl<'a> VisitorGenerator<'a> {
    /// Creates a new visitor generator.
    #[must_use]
    pub fn new(family: &'a FamilySpec) -> Self {
        Self { family }
    }

    /// Generates the visitor trait with one method per variant.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        let name = &self.family.name;
        let param = escape_ident(&module_name(name));

        output.push_str(&format!("/// Visitor over every `{name}` variant.\n"));
        output.push_str("///\n");
        output.push_str("/// Every variant has a required method, so adding a variant to the\n");
        output.push_str("/// schema breaks each implementation until it handles the new node.\n");
        output.push_str(&format!("pub trait {}<R> {{\n", visitor_trait(name)));

        for (i, variant) in self.family.variants.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&format!("    /// Visits a [`{}`] node.\n", variant.name));
            output.push_str(&format!(
                "    fn {}(&mut self, {}: &{}) -> R;\n",
                visit_method(name, &variant.name),
                param,
                variant.name
            ));
        }

        output.push_str("}\n");

        output
    }
}
