//! Generator configuration.

/// Default extension of generated files.
pub const DEFAULT_EXTENSION: &str = "rs";

/// Which constructors are emitted for each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstructorPolicy {
    /// One primary constructor taking every field.
    #[default]
    Primary,
    /// The primary constructor plus one shorter constructor per field prefix
    /// whose omitted fields are all `Option<_>`; those start out as `None`.
    PrefixOverloads,
}

/// Configuration for a [`crate::Generator`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    extension: String,
    constructor_policy: ConstructorPolicy,
    prelude: Vec<String>,
    derives: Vec<String>,
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            constructor_policy: ConstructorPolicy::Primary,
            prelude: Vec::new(),
            derives: vec!["Debug".to_string(), "Clone".to_string()],
        }
    }

    /// Sets the extension of generated files.
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the constructor policy.
    #[must_use]
    pub fn constructor_policy(mut self, policy: ConstructorPolicy) -> Self {
        self.constructor_policy = policy;
        self
    }

    /// Adds an import line emitted at the top of every family file,
    /// e.g. `use crate::token::Token;`.
    #[must_use]
    pub fn prelude(mut self, line: impl Into<String>) -> Self {
        self.prelude.push(line.into());
        self
    }

    /// Replaces the derives applied to the base enum and every node struct.
    #[must_use]
    pub fn derives<I, S>(mut self, derives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.derives = derives.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the file extension.
    #[must_use]
    pub fn file_extension(&self) -> &str {
        &self.extension
    }

    /// Returns the constructor policy.
    #[must_use]
    pub fn policy(&self) -> ConstructorPolicy {
        self.constructor_policy
    }

    /// Returns the prelude import lines.
    #[must_use]
    pub fn prelude_lines(&self) -> &[String] {
        &self.prelude
    }

    /// Returns the `#[derive(...)]` line, or `None` when no derive is configured.
    #[must_use]
    pub fn derive_attribute(&self) -> Option<String> {
        if self.derives.is_empty() {
            None
        } else {
            Some(format!("#[derive({})]\n", self.derives.join(", ")))
        }
    }

    /// Returns the names the prelude lines bring into scope.
    ///
    /// Only `use` items are inspected; glob imports contribute nothing.
    #[must_use]
    pub fn prelude_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for line in &self.prelude {
            let Ok(file) = syn::parse_file(line) else { continue };
            for item in &file.items {
                if let syn::Item::Use(item) = item {
                    collect_use_names(&item.tree, None, &mut names);
                }
            }
        }
        names
    }

    /// Returns the file name for a family.
    #[must_use]
    pub fn file_name(&self, family: &str) -> String {
        if self.extension.is_empty() {
            family.to_string()
        } else {
            format!("{}.{}", family, self.extension)
        }
    }
}

fn collect_use_names(tree: &syn::UseTree, parent: Option<&syn::Ident>, names: &mut Vec<String>) {
    match tree {
        syn::UseTree::Path(path) => collect_use_names(&path.tree, Some(&path.ident), names),
        syn::UseTree::Name(name) if name.ident == "self" => {
            if let Some(parent) = parent {
                names.push(parent.to_string());
            }
        }
        syn::UseTree::Name(name) => names.push(name.ident.to_string()),
        syn::UseTree::Rename(rename) => names.push(rename.rename.to_string()),
        syn::UseTree::Glob(_) => {}
        syn::UseTree::Group(group) => {
            for tree in &group.items {
                collect_use_names(tree, parent, names);
            }
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
