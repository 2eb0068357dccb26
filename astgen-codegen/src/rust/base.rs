//! Base enum code generation.
//!
//! The base enum stands in for the abstract base class of a node family: it
//! has one arm per variant, dispatches `accept` with an exhaustive match and
//! forwards shared-field accessors to whichever variant it holds.

use astgen_schema::FamilySpec;
use astgen_schema::naming::{setter_name, visitor_trait};

use crate::config::GeneratorConfig;
use crate::rust::constructors::Param;
use crate::rust::types::TypeResolver;

/// Generator for a family's base enum.
pub struct BaseGenerator<'a> {
    family: &'a FamilySpec,
    resolver: &'a TypeResolver<'a>,
    config: &'a GeneratorConfig,
}

impl<'a> BaseGenerator<'a> {
    /// Creates a new base generator.
    #[must_use]
    pub fn new(
        family: &'a FamilySpec,
        resolver: &'a TypeResolver<'a>,
        config: &'a GeneratorConfig,
    ) -> Self {
        Self {
            family,
            resolver,
            config,
        }
    }

    /// Generates the base enum and its impl block.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        let name = &self.family.name;

        output.push_str(&format!("/// Base of the `{name}` node family.\n"));
        if let Some(derive) = self.config.derive_attribute() {
            output.push_str(&derive);
        }
        output.push_str(&format!("pub enum {name} {{\n"));
        for variant in &self.family.variants {
            output.push_str(&format!("    /// See [`{}`].\n", variant.name));
            output.push_str(&format!("    {}({}),\n", variant.name, variant.name));
        }
        output.push_str("}\n\n");

        output.push_str(&format!("impl {name} {{\n"));
        output.push_str(&self.generate_accept());
        for field in &self.family.shared_fields {
            let param = Param::new(&field.identifier, self.resolver.resolve(&field.declared_type));
            output.push_str(&self.generate_shared_getter(&param));
            if field.mutable {
                output.push_str(&self.generate_shared_setter(&param));
            }
        }
        output.push_str("}\n\n");

        output
    }

    /// Generates the exhaustive dispatch method.
    fn generate_accept(&self) -> String {
        let mut output = String::new();
        let visitor = visitor_trait(&self.family.name);

        output.push_str(&format!(
            "    /// Dispatches to the [`{visitor}`] method of the variant held.\n"
        ));
        output.push_str(&format!(
            "    pub fn accept<R, V: {visitor}<R> + ?Sized>(&self, visitor: &mut V) -> R {{\n"
        ));
        output.push_str(&self.forward("node.accept(visitor)"));
        output.push_str("    }\n");

        output
    }

    /// Generates a getter forwarding to the held variant.
    fn generate_shared_getter(&self, param: &Param) -> String {
        let mut output = String::new();
        let ident = param.ident();

        output.push('\n');
        output.push_str(&format!(
            "    /// Returns the shared `{}` field.\n",
            param.identifier
        ));
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn {}(&self) -> &{} {{\n",
            ident, param.rust_type
        ));
        output.push_str(&self.forward(&format!("node.{ident}()")));
        output.push_str("    }\n");

        output
    }

    /// Generates a setter forwarding to the held variant.
    fn generate_shared_setter(&self, param: &Param) -> String {
        let mut output = String::new();
        let ident = param.ident();
        let setter = setter_name(&param.identifier);

        output.push('\n');
        output.push_str(&format!("    /// Sets the shared `{}` field.\n", param.identifier));
        output.push_str(&format!(
            "    pub fn {}(&mut self, {}: {}) {{\n",
            setter, ident, param.rust_type
        ));
        output.push_str(&self.forward(&format!("node.{setter}({ident})")));
        output.push_str("    }\n");

        output
    }

    /// Generates a match over every variant evaluating `body` on the held node.
    fn forward(&self, body: &str) -> String {
        if self.family.variants.is_empty() {
            return "        match *self {}\n".to_string();
        }

        let mut output = String::from("        match self {\n");
        for variant in &self.family.variants {
            output.push_str(&format!(
                "            Self::{}(node) => {},\n",
                variant.name, body
            ));
        }
        output.push_str("        }\n");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astgen_schema::{FieldSpec, SchemaRegistry, VariantSpec};

    fn generate(shared: Vec<FieldSpec>) -> String {
        let mut schema = SchemaRegistry::new();
        schema
            .register(
                "Expr",
                vec![
                    VariantSpec::parse("Unary", &["final Token operator", "final Box<Expr> right"])
                        .unwrap(),
                    VariantSpec::parse("Literal", &["final Object value"]).unwrap(),
                ],
                shared,
            )
            .unwrap();
        let family = schema.get("Expr").unwrap();
        let resolver = TypeResolver::new(&schema, family);
        let config = GeneratorConfig::default();
        BaseGenerator::new(family, &resolver, &config).generate()
    }

    #[test]
    fn test_enum_has_one_arm_per_variant() {
        let output = generate(Vec::new());
        assert!(output.contains("pub enum Expr {"));
        assert!(output.contains("    Unary(Unary),\n"));
        assert!(output.contains("    Literal(Literal),\n"));
    }

    #[test]
    fn test_accept_is_exhaustive() {
        let output = generate(Vec::new());
        assert!(output.contains("Self::Unary(node) => node.accept(visitor),"));
        assert!(output.contains("Self::Literal(node) => node.accept(visitor),"));
        assert!(!output.contains("_ =>"));
    }

    #[test]
    fn test_shared_field_accessors() {
        let output = generate(vec![FieldSpec::mutable("Option<LoxType>", "type")]);
        assert!(output.contains("pub fn r#type(&self) -> &Option<LoxType> {"));
        assert!(output.contains("Self::Unary(node) => node.r#type(),"));
        assert!(output.contains("pub fn set_type(&mut self, r#type: Option<LoxType>) {"));
        assert!(output.contains("Self::Literal(node) => node.set_type(r#type),"));
    }

    #[test]
    fn test_immutable_shared_field_has_no_setter() {
        let output = generate(vec![FieldSpec::immutable("Span", "span")]);
        assert!(output.contains("pub fn span(&self) -> &Span {"));
        assert!(!output.contains("set_span"));
    }

    #[test]
    fn test_empty_family_matches_uninhabited() {
        let family = FamilySpec::new("Expr", Vec::new(), Vec::new());
        let schema = SchemaRegistry::new();
        let resolver = TypeResolver::new(&schema, &family);
        let config = GeneratorConfig::default();
        let output = BaseGenerator::new(&family, &resolver, &config).generate();
        assert!(output.contains("pub enum Expr {\n}"));
        assert!(output.contains("match *self {}"));
    }
}
