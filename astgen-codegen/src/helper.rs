//! Family-wide shared helpers.
//!
//! A helper contributes code to every family file: something once in the
//! header, something for the base enum and something for each variant. The
//! helpers a [`crate::Generator`] uses are handed to it explicitly.

use astgen_schema::naming::visitor_trait;
use astgen_schema::{FamilySpec, VariantSpec};

/// Code contributed to every family file.
pub trait SharedHelper {
    /// Code emitted once after the imports.
    fn header(&self, family: &FamilySpec) -> String;

    /// Code emitted after the base enum.
    fn base(&self, family: &FamilySpec) -> String;

    /// Code emitted after each variant's struct.
    fn variant(&self, family: &FamilySpec, variant: &VariantSpec) -> String;

    /// Type names the helper code refers to unqualified.
    fn imported_names(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Implements `Display` for every node by running a shared formatter
/// visitor over it.
///
/// The formatter type must implement `Default` and the family's
/// visitor trait with `String` as the result type.
#[derive(Debug, Clone)]
pub struct DisplayHelper {
    /// Full path of the formatter type.
    path: String,
}

impl DisplayHelper {
    /// Name of the emitted function returning a formatter instance.
    pub const INSTANCE_FN: &'static str = "display_formatter";

    /// Creates a display helper for the formatter at `path`,
    /// e.g. `crate::printer::AstPrinter`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the formatter type name without its module path.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.path.rsplit("::").next().unwrap_or(&self.path)
    }

    fn display_impl(&self, target: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("impl std::fmt::Display for {target} {{\n"));
        output.push_str(
            "    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {\n",
        );
        output.push_str(&format!(
            "        let rendered: String = self.accept(&mut {}());\n",
            Self::INSTANCE_FN
        ));
        output.push_str("        f.write_str(&rendered)\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }
}

impl SharedHelper for DisplayHelper {
    fn header(&self, family: &FamilySpec) -> String {
        let mut output = String::new();
        let formatter = self.type_name();

        if self.path.contains("::") {
            output.push_str(&format!("use {};\n\n", self.path));
        }
        output.push_str(&format!(
            "/// Formatter shared by the `Display` impl of every `{}` node.\n",
            family.name
        ));
        output.push_str(&format!(
            "/// `{formatter}` implements `{}<String>`.\n",
            visitor_trait(&family.name)
        ));
        output.push_str(&format!(
            "fn {}() -> {formatter} {{\n",
            Self::INSTANCE_FN
        ));
        output.push_str(&format!("    {formatter}::default()\n"));
        output.push_str("}\n\n");

        output
    }

    fn base(&self, family: &FamilySpec) -> String {
        self.display_impl(&family.name)
    }

    fn variant(&self, _family: &FamilySpec, variant: &VariantSpec) -> String {
        self.display_impl(&variant.name)
    }

    fn imported_names(&self) -> Vec<String> {
        vec![self.type_name().to_string()]
    }
}
