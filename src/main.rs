//! tfdocs-extras — render nested input documentation for typed variables.
//!
//! Supports three modes:
//!
//! - **stdin mode**: `tfdocs-extras < variables.json` prints the rendering
//! - **file mode**: `tfdocs-extras variables.json -r README.md` splices the
//!   rendering between the extras markers in README.md
//! - **expression mode**: `tfdocs-extras --expr 'map(object({...}))' --name x`
//!   prints the resolved tree of a single declaration as JSON

mod links;
mod markers;
mod render;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tfdocs_extras::manifest::{build_manifest, Variable};
use tfdocs_extras::parser::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use tfdocs_extras::{DuplicateKeyPolicy, Options, ParseOptions, ResolveOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tfdocs-extras",
    about = "Generate nested input documentation from typed variable declarations"
)]
struct Cli {
    /// Variables JSON file. If omitted, reads from stdin.
    file: Option<PathBuf>,

    /// Output format: markdown, md or json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Document to update in place between the extras markers
    #[arg(short = 'r', long)]
    readme: Option<PathBuf>,

    #[arg(long, default_value = markers::START_MARKER)]
    start_marker: String,

    #[arg(long, default_value = markers::END_MARKER)]
    end_marker: String,

    /// Fail on repeated keys inside one object literal instead of keeping the last
    #[arg(long)]
    reject_duplicate_keys: bool,

    /// Maximum nesting depth of a type expression (at most 256)
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_DEPTH_LIMIT as u64)
    )]
    max_depth: usize,

    /// Resolve a single type expression and print its tree as JSON
    #[arg(long, value_name = "EXPR", conflicts_with_all = ["file", "readme"])]
    expr: Option<String>,

    /// Declared name used with --expr
    #[arg(long, requires = "expr")]
    name: Option<String>,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            parse: ParseOptions {
                max_depth: self.max_depth,
            },
            resolve: ResolveOptions {
                duplicate_keys: if self.reject_duplicate_keys {
                    DuplicateKeyPolicy::Reject
                } else {
                    DuplicateKeyPolicy::LastWriteWins
                },
            },
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(expr) = &cli.expr {
        return expr_mode(expr, cli.name.as_deref().unwrap_or_default(), cli.options());
    }

    let variables = read_variables(cli.file.as_deref())?;
    tracing::debug!(count = variables.len(), "loaded variables");

    let manifest = build_manifest(&variables, cli.options());
    if manifest.is_empty() {
        tracing::info!("no inputs to document");
    }
    let renderer = render::create_renderer(&cli.format)?;
    let output = renderer.render(&manifest)?;

    match &cli.readme {
        Some(path) => update_document(path, &output, &cli.start_marker, &cli.end_marker),
        None => {
            print!("{}", output);
            Ok(())
        }
    }
}

/// expression mode: resolve one declaration, print `null` when it is not
/// object-shaped.
fn expr_mode(expr: &str, name: &str, options: Options) -> Result<()> {
    let group = tfdocs_extras::document_declaration_with(expr, name, options)
        .with_context(|| format!("failed to document `{}`", expr))?;
    let json = serde_json::to_string_pretty(&group).context("failed to serialize tree")?;
    println!("{}", json);
    Ok(())
}

fn read_variables(path: Option<&Path>) -> Result<Vec<Variable>> {
    let input = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            input
        }
    };
    serde_json::from_str(&input).context("invalid variables JSON")
}

/// Replace the marked region of the document at `path` and write it back.
fn update_document(path: &Path, rendered: &str, start: &str, end: &str) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let updated = markers::replace_between_markers(&content, start, end, rendered)
        .with_context(|| format!("cannot update {}", path.display()))?;
    fs::write(path, updated).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "documentation updated");
    Ok(())
}
