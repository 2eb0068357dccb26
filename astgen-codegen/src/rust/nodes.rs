//! Node struct code generation.

use astgen_schema::naming::{setter_name, visit_method, visitor_trait};
use astgen_schema::{FamilySpec, FieldSpec, VariantSpec};

use crate::config::GeneratorConfig;
use crate::helper::SharedHelper;
use crate::rust::constructors::{ConstructorGenerator, Param};
use crate::rust::types::TypeResolver;

/// Generator for the node struct of one variant.
pub struct NodeGenerator<'a> {
    family: &'a FamilySpec,
    resolver: &'a TypeResolver<'a>,
    config: &'a GeneratorConfig,
    helpers: &'a [Box<dyn SharedHelper>],
}

impl<'a> NodeGenerator<'a> {
    /// Creates a new node generator.
    #[must_use]
    pub fn new(
        family: &'a FamilySpec,
        resolver: &'a TypeResolver<'a>,
        config: &'a GeneratorConfig,
        helpers: &'a [Box<dyn SharedHelper>],
    ) -> Self {
        Self {
            family,
            resolver,
            config,
            helpers,
        }
    }

    /// Generates the struct, its impl block, the lift into the base enum and
    /// the per-variant helper code.
    #[must_use]
    pub fn generate(&self, variant: &VariantSpec) -> String {
        let mut output = String::new();
        let fields: Vec<&FieldSpec> = self.family.all_fields(variant).collect();
        let params: Vec<Param> = fields
            .iter()
            .map(|f| Param::new(&f.identifier, self.resolver.resolve(&f.declared_type)))
            .collect();

        tracing::debug!(
            family = %self.family.name,
            variant = %variant.name,
            fields = fields.len(),
            "generating node"
        );

        // Struct definition
        output.push_str(&format!(
            "/// `{}` node of the `{}` family.\n",
            variant.name, self.family.name
        ));
        if let Some(derive) = self.config.derive_attribute() {
            output.push_str(&derive);
        }
        if params.is_empty() {
            output.push_str(&format!("pub struct {} {{}}\n\n", variant.name));
        } else {
            output.push_str(&format!("pub struct {} {{\n", variant.name));
            for param in &params {
                output.push_str(&format!("    {}: {},\n", param.ident(), param.rust_type));
            }
            output.push_str("}\n\n");
        }

        // Implementation
        output.push_str(&format!("impl {} {{\n", variant.name));
        output.push_str(
            &ConstructorGenerator::new(&variant.name, &params, self.config.policy()).generate(),
        );
        for (field, param) in fields.iter().zip(&params) {
            output.push_str(&generate_getter(param));
            if field.mutable {
                output.push_str(&generate_setter(param));
            }
        }
        output.push_str(&self.generate_accept(variant));
        output.push_str("}\n\n");

        // Lift into the base enum
        output.push_str(&format!(
            "impl From<{}> for {} {{\n",
            variant.name, self.family.name
        ));
        output.push_str(&format!("    fn from(node: {}) -> Self {{\n", variant.name));
        output.push_str(&format!("        Self::{}(node)\n", variant.name));
        output.push_str("    }\n");
        output.push_str("}\n\n");

        for helper in self.helpers {
            output.push_str(&helper.variant(self.family, variant));
        }

        output
    }

    /// Generates the dispatch method of a variant.
    fn generate_accept(&self, variant: &VariantSpec) -> String {
        let mut output = String::new();
        let visitor = visitor_trait(&self.family.name);
        let method = visit_method(&self.family.name, &variant.name);

        output.push_str(&format!("    /// Dispatches to [`{visitor}::{method}`].\n"));
        output.push_str(&format!(
            "    pub fn accept<R, V: {visitor}<R> + ?Sized>(&self, visitor: &mut V) -> R {{\n"
        ));
        output.push_str(&format!("        visitor.{method}(self)\n"));
        output.push_str("    }\n");

        output
    }
}

/// Generates a by-reference getter.
fn generate_getter(param: &Param) -> String {
    let mut output = String::new();
    let ident = param.ident();

    output.push_str(&format!("    /// Returns the `{}` field.\n", param.identifier));
    output.push_str("    #[must_use]\n");
    output.push_str(&format!(
        "    pub fn {}(&self) -> &{} {{\n",
        ident, param.rust_type
    ));
    output.push_str(&format!("        &self.{ident}\n"));
    output.push_str("    }\n\n");

    output
}

/// Generates a setter for a mutable field.
fn generate_setter(param: &Param) -> String {
    let mut output = String::new();
    let ident = param.ident();

    output.push_str(&format!("    /// Sets the `{}` field.\n", param.identifier));
    output.push_str(&format!(
        "    pub fn {}(&mut self, {}: {}) {{\n",
        setter_name(&param.identifier),
        ident,
        param.rust_type
    ));
    output.push_str(&format!("        self.{ident} = {ident};\n"));
    output.push_str("    }\n\n");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use astgen_schema::SchemaRegistry;

    fn schema() -> SchemaRegistry {
        let mut schema = SchemaRegistry::new();
        schema
            .register(
                "Expr",
                vec![
                    VariantSpec::parse("Literal", &["final Object value"]).unwrap(),
                    VariantSpec::parse("Symbol", &["final Token name", "usize arity"]).unwrap(),
                ],
                vec![FieldSpec::mutable("Option<LoxType>", "type")],
            )
            .unwrap();
        schema
    }

    fn generate(variant: &str) -> String {
        let schema = schema();
        let family = schema.get("Expr").unwrap();
        let resolver = TypeResolver::new(&schema, family);
        let config = GeneratorConfig::default();
        let generator = NodeGenerator::new(family, &resolver, &config, &[]);
        generator.generate(family.get_variant(variant).unwrap())
    }

    #[test]
    fn test_generate_struct() {
        let output = generate("Literal");
        assert!(output.contains("#[derive(Debug, Clone)]\npub struct Literal {"));
        assert!(output.contains("    value: Object,\n"));
        assert!(output.contains("    r#type: Option<LoxType>,\n"));
        assert!(output.contains("pub fn new(value: Object, r#type: Option<LoxType>) -> Self"));
    }

    #[test]
    fn test_immutable_fields_have_no_setter() {
        let output = generate("Symbol");
        assert!(output.contains("pub fn name(&self) -> &Token"));
        assert!(!output.contains("set_name"));
        assert!(output.contains("pub fn set_arity(&mut self, arity: usize)"));
        assert!(output.contains("pub fn set_type(&mut self, r#type: Option<LoxType>)"));
        assert!(output.contains("        self.r#type = r#type;\n"));
    }

    #[test]
    fn test_accept_targets_visitor_method() {
        let output = generate("Literal");
        assert!(output.contains("pub fn accept<R, V: ExprVisitor<R> + ?Sized>(&self, visitor: &mut V) -> R"));
        assert!(output.contains(&format!("visitor.{}(self)", visit_method("Expr", "Literal"))));
    }

    #[test]
    fn test_from_impl() {
        let output = generate("Symbol");
        assert!(output.contains("impl From<Symbol> for Expr {"));
        assert!(output.contains("Self::Symbol(node)"));
    }
}
