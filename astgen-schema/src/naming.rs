//! Naming rules shared by every emitter.
//!
//! The visitor method name is computed here and nowhere else, so the
//! dispatch method of a node and the visitor trait it targets can never
//! disagree.

/// Keywords that can be used as identifiers through the `r#` prefix.
const RAW_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use",
    "where", "while", "abstract", "become", "box", "do", "final", "gen", "macro", "override",
    "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be used as identifiers at all, not even raw.
pub const FORBIDDEN_IDENTIFIERS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Method names every node struct defines itself.
pub const RESERVED_METHODS: &[&str] = &["new", "accept"];

/// Prefix of the optional prefix-overload constructors.
pub const PREFIX_CONSTRUCTOR: &str = "new_through_";

/// Returns true if a field named `ident` would clash with a generated method.
#[must_use]
pub fn is_reserved_field(ident: &str) -> bool {
    RESERVED_METHODS.contains(&ident) || ident.starts_with(PREFIX_CONSTRUCTOR)
}

/// Returns the visitor method name for a variant of a family.
///
/// `visit_<variant>_<family>` in snake case, e.g. `visit_literal_expr`.
#[must_use]
pub fn visit_method(family: &str, variant: &str) -> String {
    format!("visit_{}_{}", to_snake_case(variant), to_snake_case(family))
}

/// Returns the visitor trait name for a family.
#[must_use]
pub fn visitor_trait(family: &str) -> String {
    format!("{family}Visitor")
}

/// Returns the module name a family's output file is mounted under.
#[must_use]
pub fn module_name(family: &str) -> String {
    to_snake_case(family)
}

/// Returns `ident` escaped for use in Rust source.
#[must_use]
pub fn escape_ident(ident: &str) -> String {
    if RAW_KEYWORDS.contains(&ident) {
        format!("r#{ident}")
    } else {
        ident.to_string()
    }
}

/// Returns the setter name for a field.
#[must_use]
pub fn setter_name(field: &str) -> String {
    format!("set_{field}")
}

/// Returns true if `s` is a plain ASCII identifier.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns true if `s` can name a family or variant type.
#[must_use]
pub fn is_type_name(s: &str) -> bool {
    is_identifier(s)
        && s.starts_with(|c: char| c.is_ascii_uppercase())
        && !FORBIDDEN_IDENTIFIERS.contains(&s)
}

/// Converts a string to snake_case.
///
/// Runs of capitals are kept together, so `LoopControl` becomes
/// `loop_control` and `IOError` becomes `io_error`.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower)
            {
                result.push('_');
            }
        }
        result.push(c.to_ascii_lowercase());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Expr"), "expr");
        assert_eq!(to_snake_case("LoopControl"), "loop_control");
        assert_eq!(to_snake_case("IOError"), "io_error");
        assert_eq!(to_snake_case("symbol"), "symbol");
    }

    #[test]
    fn test_visit_method() {
        assert_eq!(visit_method("Expr", "Literal"), "visit_literal_expr");
        assert_eq!(visit_method("Stmt", "LoopControl"), "visit_loop_control_stmt");
    }

    #[test]
    fn test_visit_method_distinct_per_family() {
        assert_ne!(visit_method("Expr", "Block"), visit_method("Stmt", "Block"));
    }

    #[test]
    fn test_escape_ident() {
        assert_eq!(escape_ident("type"), "r#type");
        assert_eq!(escape_ident("then"), "then");
        assert_eq!(escape_ident("value"), "value");
    }

    #[test]
    fn test_is_reserved_field() {
        assert!(is_reserved_field("new"));
        assert!(is_reserved_field("accept"));
        assert!(is_reserved_field("new_through_left"));
        assert!(!is_reserved_field("newline"));
    }

    #[test]
    fn test_is_type_name() {
        assert!(is_type_name("Expr"));
        assert!(!is_type_name("expr"));
        assert!(!is_type_name("Self"));
        assert!(!is_type_name("Ex pr"));
        assert!(!is_type_name(""));
    }
}
