//! Lenient, offset-preserving HTML/XML tokenizer and parser.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** — a character-level state machine producing an eager,
//!   offset-tagged token stream; every token's text is exactly the source
//!   slice it covers.
//! - **Parser** — recursive descent over the token stream, building a
//!   [`lichen_dom::DomTree`] whose nodes all carry exact byte spans, with
//!   close-tag name verification and a configurable void-element set.
//!
//! The point of the offsets is round-trip-safe editing: slice the original
//! source with any node's span, record span replacements during a visitor
//! walk, and re-splice the text without touching any unrelated byte.
//!
//! # Not implemented
//!
//! Full HTML5 tokenizer semantics (entity decoding, implicit tag closing,
//! script/style raw-text modes), error recovery (a malformed document fails
//! with a position-tagged error rather than producing a partial tree), and
//! streaming input. Charset detection and I/O are the caller's concern; the
//! input is an already-decoded string.

/// Recursive-descent parser and tree construction.
pub mod parser;
/// Character-level tokenizer.
pub mod tokenizer;

pub use parser::{ParseError, Parser, SyntaxError, DEFAULT_VOID_ELEMENTS};
pub use tokenizer::{tokenize, LexError, Token, TokenKind, TokenStream, Tokenizer, TokenizerState};

use lichen_dom::DomTree;

/// Tokenize and parse `input` into a document tree with default options.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying either the lexical or the structural
/// failure, with the offending offset and context.
pub fn parse_document(input: &str) -> Result<DomTree, ParseError> {
    let parser = Parser::new(input)?;
    parser.parse_document().map_err(ParseError::from)
}
