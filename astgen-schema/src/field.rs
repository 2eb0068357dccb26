//! Field descriptors.
//!
//! A descriptor is a single line of schema text such as `final Box<Expr> left`
//! or `usize arity`: an optional immutability marker, a type token and a
//! trailing identifier.

use crate::error::SchemaError;
use crate::naming::{FORBIDDEN_IDENTIFIERS, is_identifier};

/// Leading marker that makes a field immutable.
pub const IMMUTABLE_MARKER: &str = "final";

/// Field definition within a variant or a family's shared fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Declared type, as written in the schema (may be `Family.Variant`).
    pub declared_type: String,
    /// Field identifier.
    pub identifier: String,
    /// Whether a later pass may reassign the field after construction.
    pub mutable: bool,
}

impl FieldSpec {
    /// Creates a new field definition.
    #[must_use]
    pub fn new(declared_type: impl Into<String>, identifier: impl Into<String>, mutable: bool) -> Self {
        Self {
            declared_type: declared_type.into(),
            identifier: identifier.into(),
            mutable,
        }
    }

    /// Creates an immutable field.
    #[must_use]
    pub fn immutable(declared_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::new(declared_type, identifier, false)
    }

    /// Creates a mutable field.
    #[must_use]
    pub fn mutable(declared_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::new(declared_type, identifier, true)
    }
}

/// Parses a field descriptor into a [`FieldSpec`].
///
/// # Errors
/// Returns `SchemaError::MalformedField` if the descriptor is not exactly a
/// type token followed by one identifier.
pub fn parse_field(descriptor: &str) -> Result<FieldSpec, SchemaError> {
    let tokens = split_top_level(descriptor)
        .map_err(|reason| SchemaError::malformed(descriptor, reason))?;

    let (mutable, rest) = match tokens.split_first() {
        Some((first, rest)) if first == IMMUTABLE_MARKER => (false, rest),
        _ => (true, tokens.as_slice()),
    };

    let (declared_type, identifier) = match rest {
        [declared_type, identifier] => (declared_type, identifier),
        [] => return Err(SchemaError::malformed(descriptor, "empty descriptor")),
        [_] => return Err(SchemaError::malformed(descriptor, "expected a type and an identifier")),
        _ => {
            return Err(SchemaError::malformed(
                descriptor,
                "expected exactly one identifier after the type",
            ));
        }
    };

    if !is_identifier(identifier) {
        return Err(SchemaError::malformed(
            descriptor,
            format!("'{identifier}' is not an identifier"),
        ));
    }
    if FORBIDDEN_IDENTIFIERS.contains(&identifier.as_str()) {
        return Err(SchemaError::malformed(
            descriptor,
            format!("'{identifier}' cannot be used as a field name"),
        ));
    }
    if declared_type == IMMUTABLE_MARKER {
        return Err(SchemaError::malformed(descriptor, "missing type"));
    }

    Ok(FieldSpec::new(declared_type.as_str(), identifier.as_str(), mutable))
}

/// Parses a list of field descriptors, keeping their order.
///
/// # Errors
/// Returns the first `SchemaError::MalformedField` encountered.
pub fn parse_fields(descriptors: &[&str]) -> Result<Vec<FieldSpec>, SchemaError> {
    descriptors.iter().map(|d| parse_field(d)).collect()
}

/// Splits a descriptor on whitespace that is not nested inside brackets.
///
/// Whitespace inside brackets collapses to one space after a comma or between
/// two words and is dropped elsewhere, so `HashMap<String,  Vec<Expr> >`
/// normalizes to `HashMap<String, Vec<Expr>>`.
fn split_top_level(descriptor: &str) -> Result<Vec<String>, &'static str> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut stack: Vec<char> = Vec::new();
    let mut pending_space = false;

    for c in descriptor.chars() {
        if c.is_whitespace() {
            if stack.is_empty() {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            } else {
                pending_space = true;
            }
            continue;
        }

        if pending_space {
            let prev = current.chars().last();
            let joins_words = prev.is_some_and(is_word_char) && is_word_char(c);
            if prev == Some(',') || joins_words {
                current.push(' ');
            }
            pending_space = false;
        }

        match c {
            '<' | '(' | '[' => stack.push(c),
            '>' | ')' | ']' => {
                let open = match c {
                    '>' => '<',
                    ')' => '(',
                    _ => '[',
                };
                if stack.pop() != Some(open) {
                    return Err("unbalanced brackets in type");
                }
            }
            _ => {}
        }
        current.push(c);
    }

    if !stack.is_empty() {
        return Err("unbalanced brackets in type");
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
