//! `astgen` command-line interface.
//!
//! Generates the built-in Lox node families into a destination directory.
//! Set `RUST_LOG=astgen=debug` to see each rendered family.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use astgen::codegen::{ConstructorPolicy, Generator};
use astgen::lox;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generates strongly-typed AST node definitions and visitors",
    long_about = "Generates strongly-typed AST node definitions and visitors.\n\
                 Writes one module per node family to <DESTINATION>/<Family>.rs,\n\
                 overwriting previous output.\n\
                 \n\
                 Example usage:\n\
                 astgen src/ast                       # Expr.rs and Stmt.rs\n\
                 astgen src/ast --prefix-overloads    # also emit new_through_* constructors"
)]
struct Cli {
    /// Directory the generated files are written to
    destination: PathBuf,

    /// Emit a constructor for every proper prefix of a node's fields
    #[arg(long)]
    prefix_overloads: bool,
}

impl Cli {
    fn policy(&self) -> ConstructorPolicy {
        if self.prefix_overloads {
            ConstructorPolicy::PrefixOverloads
        } else {
            ConstructorPolicy::Primary
        }
    }
}

/// Generates the Lox families into `destination`.
fn run(destination: &Path, policy: ConstructorPolicy) -> anyhow::Result<Vec<PathBuf>> {
    let schema = lox::schema().context("invalid built-in schema")?;

    let written = Generator::new(&schema, lox::config(policy))
        .helper(lox::display_helper())
        .write_all(destination)
        .with_context(|| format!("failed to generate into {}", destination.display()))?;

    Ok(written)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("astgen=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let written = run(&cli.destination, cli.policy())?;

    info!(
        destination = %cli.destination.display(),
        files = written.len(),
        "generation complete"
    );
    Ok(())
}
