//! Constructor code generation.
//!
//! The primary constructor takes every field of a variant, variant fields
//! first and shared fields last, and assigns each one exactly once. Prefix
//! overloads, when enabled, delegate to it with `None` for the omitted fields,
//! so a prefix is only offered when every omitted field is an `Option`.

use astgen_schema::naming::{PREFIX_CONSTRUCTOR, escape_ident};

use crate::config::ConstructorPolicy;

/// Parameters above which clippy's `too_many_arguments` lint fires.
const CLIPPY_MAX_ARGUMENTS: usize = 7;

/// A constructor parameter: escaped identifier and resolved Rust type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Raw field identifier from the schema.
    pub identifier: String,
    /// Rust type of the parameter.
    pub rust_type: String,
}

impl Param {
    /// Creates a new parameter.
    #[must_use]
    pub fn new(identifier: impl Into<String>, rust_type: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            rust_type: rust_type.into(),
        }
    }

    /// Returns true if the parameter can be omitted as `None`.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        let ty = self.rust_type.trim_start();
        let ty = ty
            .strip_prefix("::")
            .unwrap_or(ty)
            .trim_start_matches("std::option::")
            .trim_start_matches("core::option::");
        ty.strip_prefix("Option")
            .is_some_and(|rest| rest.trim_start().starts_with('<'))
    }

    /// Returns the identifier as it must appear in Rust source.
    #[must_use]
    pub fn ident(&self) -> String {
        escape_ident(&self.identifier)
    }
}

/// Generator for variant constructors.
pub struct ConstructorGenerator<'a> {
    variant: &'a str,
    params: &'a [Param],
    policy: ConstructorPolicy,
}

impl<'a> ConstructorGenerator<'a> {
    /// Creates a constructor generator for one variant.
    ///
    /// # Arguments
    /// * `variant` - Variant name, used in doc comments
    /// * `params` - Every field in declaration order, shared fields last
    /// * `policy` - Which constructors to emit
    #[must_use]
    pub fn new(variant: &'a str, params: &'a [Param], policy: ConstructorPolicy) -> Self {
        Self {
            variant,
            params,
            policy,
        }
    }

    /// Generates every constructor for the variant.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = self.generate_primary();
        if self.policy == ConstructorPolicy::PrefixOverloads {
            for len in 1..self.params.len() {
                if self.params[len..].iter().all(Param::is_optional) {
                    output.push_str(&self.generate_prefix(len));
                }
            }
        }
        output
    }

    /// Generates the primary constructor.
    fn generate_primary(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("    /// Creates a new `{}` node.\n", self.variant));
        output.push_str("    #[must_use]\n");
        if self.params.len() > CLIPPY_MAX_ARGUMENTS {
            output.push_str("    #[allow(clippy::too_many_arguments)]\n");
        }
        output.push_str(&format!(
            "    pub fn new({}) -> Self {{\n",
            signature(self.params)
        ));
        if self.params.is_empty() {
            output.push_str("        Self {}\n");
        } else {
            output.push_str("        Self {\n");
            for param in self.params {
                output.push_str(&format!("            {},\n", param.ident()));
            }
            output.push_str("        }\n");
        }
        output.push_str("    }\n\n");

        output
    }

    /// Generates the constructor that takes the first `len` fields.
    fn generate_prefix(&self, len: usize) -> String {
        let mut output = String::new();
        let (given, omitted) = self.params.split_at(len);
        let last = &given[len - 1];

        output.push_str(&format!(
            "    /// Creates a `{}` node from its fields up to `{}`; the remaining fields\n",
            self.variant, last.identifier
        ));
        output.push_str("    /// start out as `None`.\n");
        output.push_str("    #[must_use]\n");
        if len > CLIPPY_MAX_ARGUMENTS {
            output.push_str("    #[allow(clippy::too_many_arguments)]\n");
        }
        output.push_str(&format!(
            "    pub fn {}({}) -> Self {{\n",
            prefix_constructor_name(&last.identifier),
            signature(given)
        ));

        let args: Vec<String> = given
            .iter()
            .map(Param::ident)
            .chain(omitted.iter().map(|_| "None".to_string()))
            .collect();
        output.push_str(&format!("        Self::new({})\n", args.join(", ")));
        output.push_str("    }\n\n");

        output
    }
}

/// Returns the name of the prefix constructor ending at `field`.
#[must_use]
pub fn prefix_constructor_name(field: &str) -> String {
    format!("{PREFIX_CONSTRUCTOR}{field}")
}

/// Formats a parameter list: `a: A, b: B`.
fn signature(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| format!("{}: {}", p.ident(), p.rust_type))
        .collect::<Vec<_>>()
        .join(", ")
}
