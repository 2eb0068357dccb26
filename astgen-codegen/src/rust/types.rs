//! Declared type resolution.
//!
//! Schema types are written the way the grammar author thinks about them:
//! `Expr`, `Vec<Expr.Symbol>`, `Stmt.Block`. This module rewrites the
//! qualified `Family.Variant` form into Rust paths and works out which other
//! family modules a file has to import.

use astgen_schema::naming::module_name;
use astgen_schema::{FamilySpec, SchemaRegistry};

/// Resolves declared field types for one family.
pub struct TypeResolver<'a> {
    schema: &'a SchemaRegistry,
    family: &'a FamilySpec,
}

/// What a family file uses from another family.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct FamilyUse {
    /// The family base type is named directly.
    base: bool,
    /// A variant is reached through the family module.
    module: bool,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver for the given family.
    #[must_use]
    pub fn new(schema: &'a SchemaRegistry, family: &'a FamilySpec) -> Self {
        Self { schema, family }
    }

    /// Rewrites a declared type into Rust syntax.
    ///
    /// `Family.Variant` becomes `Variant` inside its own family and
    /// `family::Variant` elsewhere. Everything else is kept as written.
    #[must_use]
    pub fn resolve(&self, declared: &str) -> String {
        let mut output = String::with_capacity(declared.len() + 8);
        for token in tokenize(declared) {
            match token {
                Token::Path(path) => output.push_str(&self.resolve_path(path)),
                Token::Other(text) => output.push_str(text),
            }
        }
        output
    }

    fn resolve_path(&self, path: &str) -> String {
        match path.split_once('.') {
            Some((head, tail)) if head == self.family.name => tail.replace('.', "::"),
            Some((head, tail)) if self.schema.contains(head) => {
                format!("{}::{}", module_name(head), tail.replace('.', "::"))
            }
            Some(_) => path.replace('.', "::"),
            None => path.to_string(),
        }
    }

    /// Returns the `use` lines needed for references to other families, in
    /// registration order.
    #[must_use]
    pub fn cross_family_imports(&self) -> Vec<String> {
        let mut uses = vec![FamilyUse::default(); self.schema.len()];

        let fields = self
            .family
            .variants
            .iter()
            .flat_map(|v| v.fields.iter())
            .chain(self.family.shared_fields.iter());

        for field in fields {
            for token in tokenize(&field.declared_type) {
                let Token::Path(path) = token else { continue };
                let (head, qualified) = match path.split_once('.') {
                    Some((head, _)) => (head, true),
                    None => (path, false),
                };
                if head == self.family.name {
                    continue;
                }
                if let Some(idx) = self.schema.all().iter().position(|f| f.name == head) {
                    if qualified {
                        uses[idx].module = true;
                    } else {
                        uses[idx].base = true;
                    }
                }
            }
        }

        self.schema
            .all()
            .iter()
            .zip(uses)
            .filter_map(|(family, used)| {
                let module = module_name(&family.name);
                match (used.module, used.base) {
                    (true, true) => Some(format!("use super::{}::{{self, {}}};", module, family.name)),
                    (true, false) => Some(format!("use super::{module};")),
                    (false, true) => Some(format!("use super::{}::{};", module, family.name)),
                    (false, false) => None,
                }
            })
            .collect()
    }
}

/// A piece of a declared type.
#[derive(Debug, PartialEq, Eq)]
enum Token<'s> {
    /// An identifier, possibly dotted (`Expr.Symbol`).
    Path(&'s str),
    /// Punctuation and whitespace.
    Other(&'s str),
}

/// Splits a declared type into dotted identifiers and the text between them.
fn tokenize(declared: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_path = false;

    for (i, c) in declared.char_indices() {
        let path_char = c.is_alphanumeric() || c == '_' || (c == '.' && in_path);
        if path_char != in_path {
            if i > start {
                tokens.push(slice_token(&declared[start..i], in_path));
            }
            start = i;
            in_path = path_char;
        }
    }
    if start < declared.len() {
        tokens.push(slice_token(&declared[start..], in_path));
    }
    tokens
}

fn slice_token(text: &str, is_path: bool) -> Token<'_> {
    if is_path {
        Token::Path(text)
    } else {
        Token::Other(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astgen_schema::VariantSpec;

    fn schema() -> SchemaRegistry {
        let mut schema = SchemaRegistry::new();
        schema
            .register(
                "Expr",
                vec![
                    VariantSpec::parse("Symbol", &["final Token name"]).unwrap(),
                    VariantSpec::parse("Call", &["final Expr.Symbol callee", "final Vec<Expr> arguments"])
                        .unwrap(),
                ],
                Vec::new(),
            )
            .unwrap();
        schema
            .register(
                "Stmt",
                vec![
                    VariantSpec::parse("Block", &["final Vec<Stmt> statements"]).unwrap(),
                    VariantSpec::parse(
                        "Function",
                        &[
                            "final Expr.Symbol identifier",
                            "final Vec<Expr.Symbol> arguments",
                            "final Stmt.Block body",
                        ],
                    )
                    .unwrap(),
                ],
                Vec::new(),
            )
            .unwrap();
        schema
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Vec<Expr.Symbol>"),
            vec![Token::Path("Vec"), Token::Other("<"), Token::Path("Expr.Symbol"), Token::Other(">")]
        );
    }

    #[test]
    fn test_resolve_own_family_variant() {
        let schema = schema();
        let resolver = TypeResolver::new(&schema, schema.get("Stmt").unwrap());
        assert_eq!(resolver.resolve("Stmt.Block"), "Block");
        assert_eq!(resolver.resolve("Vec<Stmt>"), "Vec<Stmt>");
    }

    #[test]
    fn test_resolve_other_family_variant() {
        let schema = schema();
        let resolver = TypeResolver::new(&schema, schema.get("Stmt").unwrap());
        assert_eq!(resolver.resolve("Vec<Expr.Symbol>"), "Vec<expr::Symbol>");
        assert_eq!(resolver.resolve("Option<Box<Expr>>"), "Option<Box<Expr>>");
    }

    #[test]
    fn test_resolve_unknown_qualified_path() {
        let schema = schema();
        let resolver = TypeResolver::new(&schema, schema.get("Expr").unwrap());
        assert_eq!(resolver.resolve("token.Token"), "token::Token");
        assert_eq!(resolver.resolve("HashMap<String, u8>"), "HashMap<String, u8>");
    }

    #[test]
    fn test_cross_family_imports() {
        let schema = schema();
        let resolver = TypeResolver::new(&schema, schema.get("Stmt").unwrap());
        assert_eq!(resolver.cross_family_imports(), ["use super::expr;"]);

        let resolver = TypeResolver::new(&schema, schema.get("Expr").unwrap());
        assert!(resolver.cross_family_imports().is_empty());
    }

    #[test]
    fn test_cross_family_imports_base_and_module() {
        let mut schema = SchemaRegistry::new();
        schema
            .register("Expr", vec![VariantSpec::parse("Symbol", &["final Token name"]).unwrap()], Vec::new())
            .unwrap();
        schema
            .register(
                "Stmt",
                vec![
                    VariantSpec::parse("Print", &["final Expr expression"]).unwrap(),
                    VariantSpec::parse("Var", &["final Expr.Symbol identifier"]).unwrap(),
                ],
                Vec::new(),
            )
            .unwrap();

        let resolver = TypeResolver::new(&schema, schema.get("Stmt").unwrap());
        assert_eq!(resolver.cross_family_imports(), ["use super::expr::{self, Expr};"]);
    }
}
