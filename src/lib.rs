//! tfdocs-extras — structured documentation for typed variable declarations.
//!
//! A declaration's type is written in a small expression language:
//!
//! ```text
//! optional(object({
//!   /// Display name
//!   name = string
//!   /** @enum small | large */
//!   size = optional(string, "small")
//! }))
//! ```
//!
//! The pipeline is [`parser`] → [`resolve`], with [`docblock`] and
//! [`directive`] turning attached comments into prose and typed
//! `@directive` records. [`manifest`] assembles resolved declarations into
//! input tables for renderers.

pub mod ast;
pub mod directive;
pub mod docblock;
pub mod error;
pub mod lexer;
pub mod manifest;
pub mod model;
pub mod parser;
pub mod resolve;

pub use error::{Error, ParseError, Position, ResolveError};
pub use model::{CollectionPrefix, ObjectField, ObjectGroup};
pub use parser::ParseOptions;
pub use resolve::{DuplicateKeyPolicy, ResolveOptions, Resolver};

/// Options for [`document_declaration_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub parse: ParseOptions,
    pub resolve: ResolveOptions,
}

/// Parse `type_expr` and resolve it as the declaration `name`.
///
/// Returns `Ok(None)` when the declaration is valid but not object-shaped.
pub fn document_declaration(type_expr: &str, name: &str) -> Result<Option<ObjectGroup>, Error> {
    document_declaration_with(type_expr, name, Options::default())
}

pub fn document_declaration_with(
    type_expr: &str,
    name: &str,
    options: Options,
) -> Result<Option<ObjectGroup>, Error> {
    let root = parser::parse_with_options(type_expr, options.parse)?;
    let group = Resolver::new(options.resolve).resolve_group(&root, name)?;
    Ok(group)
}
