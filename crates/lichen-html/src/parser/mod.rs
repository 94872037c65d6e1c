//! Recursive-descent parsing of the token stream into a document tree.

/// Parser implementation.
pub mod core;

pub use self::core::{ParseError, Parser, SyntaxError, DEFAULT_VOID_ELEMENTS};
