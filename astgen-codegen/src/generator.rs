//! Family assembler and writer.
//!
//! Each family becomes one self-contained Rust module file: header, base
//! enum, one struct per variant and the visitor trait, in that order.
//! Rendering is pure; [`Generator::write_all`] renders everything before it
//! touches the filesystem.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use astgen_schema::naming::module_name;
use astgen_schema::{FamilySpec, SchemaError, SchemaRegistry, validate_family};
use tempfile::NamedTempFile;

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::helper::SharedHelper;
use crate::rust::{BaseGenerator, NodeGenerator, TypeResolver, VisitorGenerator};

/// Banner line marking a file as generated.
pub const GENERATED_MARKER: &str = "@generated by astgen";

/// One rendered family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Family name.
    pub family: String,
    /// File name inside the destination directory.
    pub file_name: String,
    /// File contents.
    pub contents: String,
}

/// Generates node definitions for every family of a schema.
pub struct Generator<'a> {
    schema: &'a SchemaRegistry,
    config: GeneratorConfig,
    helpers: Vec<Box<dyn SharedHelper>>,
}

impl<'a> Generator<'a> {
    /// Creates a new generator over a fully registered schema.
    #[must_use]
    pub fn new(schema: &'a SchemaRegistry, config: GeneratorConfig) -> Self {
        Self {
            schema,
            config,
            helpers: Vec::new(),
        }
    }

    /// Adds a helper contributing code to every family file.
    #[must_use]
    pub fn helper(mut self, helper: impl SharedHelper + 'static) -> Self {
        self.helpers.push(Box::new(helper));
        self
    }

    /// Returns the generator configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Renders one family.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` if the family is invalid and
    /// `CodegenError::InvalidOutput` if the assembled code does not parse.
    pub fn generate_family(&self, family: &FamilySpec) -> Result<String, CodegenError> {
        validate_family(family)?;
        self.check_imported_names(family)?;

        let resolver = TypeResolver::new(self.schema, family);
        let mut output = String::new();

        output.push_str(&self.generate_header(family, &resolver));

        output.push_str(&BaseGenerator::new(family, &resolver, &self.config).generate());
        for helper in &self.helpers {
            output.push_str(&helper.base(family));
        }

        let nodes = NodeGenerator::new(family, &resolver, &self.config, &self.helpers);
        for variant in &family.variants {
            output.push_str(&nodes.generate(variant));
        }

        output.push_str(&VisitorGenerator::new(family).generate());

        syn::parse_file(&output)
            .map_err(|e| CodegenError::invalid_output(&family.name, e.to_string()))?;

        tracing::debug!(
            family = %family.name,
            variants = family.variants.len(),
            bytes = output.len(),
            "rendered family"
        );

        Ok(output)
    }

    /// Renders every family in registration order.
    ///
    /// # Errors
    /// Returns the first error raised by [`Generator::generate_family`].
    pub fn generate_all(&self) -> Result<Vec<GeneratedFile>, CodegenError> {
        self.schema.validate()?;

        self.schema
            .all()
            .iter()
            .map(|family| {
                Ok(GeneratedFile {
                    family: family.name.clone(),
                    file_name: self.config.file_name(&family.name),
                    contents: self.generate_family(family)?,
                })
            })
            .collect()
    }

    /// Renders every family and writes it to `<destination>/<Family>.<extension>`,
    /// overwriting existing files.
    ///
    /// Every family is staged in a temporary file inside `destination` first
    /// and every target is checked before anything is put in place. If moving
    /// a staged file into place still fails, the targets already replaced are
    /// restored, so a failed run leaves the destination as it found it.
    ///
    /// # Returns
    /// The paths written, in registration order.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if the destination cannot be created or
    /// written, or any rendering error.
    pub fn write_all(&self, destination: &Path) -> Result<Vec<PathBuf>, CodegenError> {
        let files = self.generate_all()?;

        std::fs::create_dir_all(destination)
            .map_err(|e| CodegenError::io(destination, e))?;

        let targets: Vec<PathBuf> = files
            .iter()
            .map(|file| destination.join(&file.file_name))
            .collect();
        if let Some(blocked) = targets.iter().find(|path| path.is_dir()) {
            return Err(CodegenError::io(
                blocked,
                std::io::Error::new(ErrorKind::IsADirectory, "target is a directory"),
            ));
        }

        let mut staged = Vec::with_capacity(files.len());
        for (file, path) in files.iter().zip(targets) {
            let mut temp = tempfile::Builder::new()
                .prefix(".astgen-")
                .suffix(".tmp")
                .tempfile_in(destination)
                .map_err(|e| CodegenError::io(destination, e))?;
            temp.write_all(file.contents.as_bytes())
                .and_then(|()| temp.flush())
                .map_err(|e| CodegenError::io(temp.path(), e))?;
            staged.push((temp, path));
        }

        persist_staged(staged)
    }

    /// Checks that no variant reuses a name the file imports.
    fn check_imported_names(&self, family: &FamilySpec) -> Result<(), CodegenError> {
        let imported: Vec<String> = self
            .config
            .prelude_names()
            .into_iter()
            .chain(self.helpers.iter().flat_map(|helper| helper.imported_names()))
            .collect();

        let clash = std::iter::once(&family.name)
            .chain(family.variants.iter().map(|variant| &variant.name))
            .find(|name| imported.contains(*name));
        match clash {
            Some(name) if *name == family.name => {
                Err(SchemaError::invalid_name("family", name).into())
            }
            Some(name) => Err(SchemaError::invalid_name("variant", name).into()),
            None => Ok(()),
        }
    }

    /// Generates the file header: banner, lint allowances and imports.
    fn generate_header(&self, family: &FamilySpec, resolver: &TypeResolver<'_>) -> String {
        let mut output = String::new();

        output.push_str(&format!("//! `{}` node family.\n", family.name));
        output.push_str("//!\n");
        output.push_str(&format!(
            "//! {GENERATED_MARKER}; do not edit by hand. Mount as module `{}`.\n\n",
            module_name(&family.name)
        ));
        output.push_str("#![allow(unused_imports, dead_code, clippy::new_without_default)]\n\n");

        let prelude = self.config.prelude_lines();
        let cross = resolver.cross_family_imports();
        for line in prelude.iter().chain(cross.iter()) {
            output.push_str(line);
            output.push('\n');
        }
        if !prelude.is_empty() || !cross.is_empty() {
            output.push('\n');
        }

        for helper in &self.helpers {
            output.push_str(&helper.header(family));
        }

        output
    }
}

/// Moves staged files into place in order.
///
/// Previous contents are kept in memory until every file is in place; on
/// failure each replaced target is restored and each new one removed.
fn persist_staged(staged: Vec<(NamedTempFile, PathBuf)>) -> Result<Vec<PathBuf>, CodegenError> {
    let mut written: Vec<(PathBuf, Option<Vec<u8>>)> = Vec::with_capacity(staged.len());

    for (temp, path) in staged {
        let previous = match std::fs::read(&path) {
            Ok(bytes) => {
                tracing::debug!(path = %path.display(), "overwriting existing file");
                Some(bytes)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                rollback(&written);
                return Err(CodegenError::io(&path, e));
            }
        };
        if let Err(e) = temp.persist(&path) {
            rollback(&written);
            return Err(CodegenError::io(&path, e.error));
        }
        tracing::info!(path = %path.display(), "wrote family");
        written.push((path, previous));
    }

    Ok(written.into_iter().map(|(path, _)| path).collect())
}

/// Restores targets replaced by a failed [`persist_staged`] run, newest first.
fn rollback(written: &[(PathBuf, Option<Vec<u8>>)]) {
    for (path, previous) in written.iter().rev() {
        let restored = match previous {
            Some(bytes) => std::fs::write(path, bytes),
            None => std::fs::remove_file(path),
        };
        match restored {
            Ok(()) => tracing::debug!(path = %path.display(), "restored file"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to restore file"),
        }
    }
}
