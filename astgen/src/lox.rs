//! Built-in Lox grammar.
//!
//! Two families: `Expr` for expressions and `Stmt` for statements. Fields
//! marked `final` are set once by the parser; the rest are filled in by later
//! passes (`type` by the type checker, `arity` by the resolver).

use astgen_codegen::{ConstructorPolicy, DisplayHelper, GeneratorConfig};
use astgen_schema::{FieldSpec, SchemaError, SchemaRegistry, VariantSpec};

/// Formatter every generated node renders itself with.
pub const PRINTER_PATH: &str = "crate::printer::AstPrinter";

/// Builds the Lox schema.
///
/// # Errors
/// Returns `SchemaError` if a descriptor is malformed or a name collides.
pub fn schema() -> Result<SchemaRegistry, SchemaError> {
    let mut schema = SchemaRegistry::new();

    schema.register(
        "Expr",
        vec![
            VariantSpec::parse("Unary", &["final Token operator", "final Box<Expr> right"])?,
            VariantSpec::parse(
                "Binary",
                &["final Box<Expr> left", "final Token operator", "final Box<Expr> right"],
            )?,
            VariantSpec::parse(
                "Logical",
                &["final Box<Expr> left", "final Token operator", "final Box<Expr> right"],
            )?,
            VariantSpec::parse("Grouping", &["final Box<Expr> expression"])?,
            VariantSpec::parse("Literal", &["final Value value"])?,
            VariantSpec::parse("Symbol", &["final Token name", "Option<usize> arity"])?,
            VariantSpec::parse(
                "Assign",
                &["final Expr.Symbol lvalue", "final Token equal", "final Box<Expr> rvalue"],
            )?,
            VariantSpec::parse(
                "Call",
                &["final Expr.Symbol callee", "final Token paren", "final Vec<Expr> arguments"],
            )?,
        ],
        vec![FieldSpec::mutable("Option<LoxType>", "type")],
    )?;

    schema.register(
        "Stmt",
        vec![
            VariantSpec::parse("Expression", &["final Expr expression"])?,
            VariantSpec::parse("Print", &["final Expr expression"])?,
            VariantSpec::parse(
                "Var",
                &["final Expr.Symbol identifier", "final Option<Expr> expression"],
            )?,
            VariantSpec::parse("Block", &["final Vec<Stmt> statements"])?,
            VariantSpec::parse(
                "If",
                &[
                    "final Expr condition",
                    "final Box<Stmt> then",
                    "final Option<Box<Stmt>> otherwise",
                ],
            )?,
            VariantSpec::parse("While", &["final Expr condition", "final Box<Stmt> body"])?,
            VariantSpec::parse("LoopControl", &["final Token keyword"])?,
            VariantSpec::parse(
                "Function",
                &[
                    "final Expr.Symbol identifier",
                    "final Vec<Expr.Symbol> arguments",
                    "final Stmt.Block body",
                ],
            )?,
        ],
        Vec::new(),
    )?;

    Ok(schema)
}

/// Generator configuration for the Lox interpreter crate.
#[must_use]
pub fn config(policy: ConstructorPolicy) -> GeneratorConfig {
    GeneratorConfig::new()
        .constructor_policy(policy)
        .prelude("use crate::token::Token;")
        .prelude("use crate::types::LoxType;")
        .prelude("use crate::value::Value;")
}

/// Display helper wiring every node to the shared [`PRINTER_PATH`] formatter.
#[must_use]
pub fn display_helper() -> DisplayHelper {
    DisplayHelper::new(PRINTER_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use astgen_codegen::Generator;

    #[test]
    fn test_schema_registers_both_families() {
        let schema = schema().unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.get("Expr").unwrap().variants.len(), 8);
        assert_eq!(schema.get("Stmt").unwrap().variants.len(), 8);
        assert!(schema.get("Expr").unwrap().has_shared_fields());
        assert!(!schema.get("Stmt").unwrap().has_shared_fields());
    }

    #[test]
    fn test_symbol_arity_is_mutable() {
        let schema = schema().unwrap();
        let symbol = schema.get("Expr").unwrap().get_variant("Symbol").unwrap();
        assert!(!symbol.fields[0].mutable);
        assert!(symbol.fields[1].mutable);
    }

    #[test]
    fn test_generated_files_parse() {
        let schema = schema().unwrap();
        for policy in [ConstructorPolicy::Primary, ConstructorPolicy::PrefixOverloads] {
            let files = Generator::new(&schema, config(policy))
                .helper(display_helper())
                .generate_all()
                .unwrap();
            assert_eq!(files.len(), 2);
            assert!(files.iter().all(|f| syn::parse_file(&f.contents).is_ok()));
        }
    }

    /// Checks every `new_through_*` constructor against `new` in the same impl:
    /// given parameters are passed through and every omitted one is an
    /// `Option` passed as `None`. Returns the number of constructors checked.
    fn check_prefix_constructors(source: &str) -> usize {
        let file = syn::parse_file(source).unwrap();
        let mut checked = 0;

        for item in &file.items {
            let syn::Item::Impl(block) = item else { continue };
            let fns: Vec<&syn::ImplItemFn> = block
                .items
                .iter()
                .filter_map(|item| match item {
                    syn::ImplItem::Fn(f) => Some(f),
                    _ => None,
                })
                .collect();
            let Some(new) = fns.iter().find(|f| f.sig.ident == "new") else { continue };
            let new_types: Vec<String> = new
                .sig
                .inputs
                .iter()
                .map(|arg| match arg {
                    syn::FnArg::Typed(arg) => match &*arg.ty {
                        syn::Type::Path(ty) => ty.path.segments[0].ident.to_string(),
                        _ => String::new(),
                    },
                    syn::FnArg::Receiver(_) => panic!("constructor takes self"),
                })
                .collect();

            for f in fns.iter().filter(|f| f.sig.ident.to_string().starts_with("new_through_")) {
                let given = f.sig.inputs.len();
                let [syn::Stmt::Expr(syn::Expr::Call(call), None)] = f.block.stmts.as_slice() else {
                    panic!("{} does not delegate to new", f.sig.ident);
                };
                assert_eq!(call.args.len(), new_types.len());
                for (i, arg) in call.args.iter().enumerate() {
                    let is_none = matches!(arg, syn::Expr::Path(p) if p.path.is_ident("None"));
                    if i < given {
                        assert!(!is_none);
                    } else {
                        assert!(is_none, "{}: argument {i}", f.sig.ident);
                        assert_eq!(new_types[i], "Option", "{}: argument {i}", f.sig.ident);
                    }
                }
                checked += 1;
            }
        }
        checked
    }

    #[test]
    fn test_prefix_constructors_only_omit_optional_fields() {
        let schema = schema().unwrap();
        let files = Generator::new(&schema, config(ConstructorPolicy::PrefixOverloads))
            .helper(display_helper())
            .generate_all()
            .unwrap();

        for file in &files {
            assert!(!file.contents.contains("Default::default()"));
        }
        // Expr: one per variant through its last own field, plus `new_through_name`.
        assert_eq!(check_prefix_constructors(&files[0].contents), 9);
        // Stmt: `new_through_identifier` on Var and `new_through_then` on If.
        assert_eq!(check_prefix_constructors(&files[1].contents), 2);
        assert!(files[0].contents.contains("Self::new(name, None, None)"));
        assert!(files[1].contents.contains("Self::new(condition, then, None)"));
    }

    #[test]
    fn test_literal_node() {
        let schema = schema().unwrap();
        let files = Generator::new(&schema, config(ConstructorPolicy::Primary))
            .generate_all()
            .unwrap();
        let expr = &files[0].contents;

        assert_eq!(files[0].file_name, "Expr.rs");
        assert!(expr.contains("pub fn new(value: Value, r#type: Option<LoxType>) -> Self"));
        assert!(expr.contains("visitor.visit_literal_expr(self)"));
        assert!(expr.contains("fn visit_literal_expr(&mut self, expr: &Literal) -> R;"));
    }

    #[test]
    fn test_stmt_imports_expr_family() {
        let schema = schema().unwrap();
        let files = Generator::new(&schema, config(ConstructorPolicy::Primary))
            .generate_all()
            .unwrap();
        let stmt = &files[1].contents;

        assert_eq!(files[1].file_name, "Stmt.rs");
        assert!(stmt.contains("use super::expr::{self, Expr};"));
        assert!(stmt.contains("identifier: expr::Symbol"));
        assert!(stmt.contains("body: Block"));
    }

    #[test]
    fn test_duplicate_variant_is_rejected() {
        let mut schema = SchemaRegistry::new();
        let binary = VariantSpec::parse("Binary", &["final Box<Expr> left"]).unwrap();
        let result = schema.register("Expr", vec![binary.clone(), binary], Vec::new());
        assert!(matches!(result, Err(SchemaError::DuplicateVariant { .. })));
        assert!(schema.is_empty());
    }
}
