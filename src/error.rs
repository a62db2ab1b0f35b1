//! Error types for parsing and resolving type expressions.

use std::fmt;
use thiserror::Error;

/// Location in the source text. `line` and `column` are 1-based, `column`
/// counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn start() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A type expression could not be turned into a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{position}: {message}")]
    Lex { position: Position, message: String },

    #[error("{position}: expected {expected}, found {found}")]
    Syntax {
        position: Position,
        expected: String,
        found: String,
    },

    #[error("{position}: nesting deeper than {limit} levels")]
    DepthExceeded { position: Position, limit: usize },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex { position, .. }
            | ParseError::Syntax { position, .. }
            | ParseError::DepthExceeded { position, .. } => *position,
        }
    }
}

/// A parsed tree could not be resolved under the active options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("duplicate property key `{key}`")]
    DuplicateKey { key: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
