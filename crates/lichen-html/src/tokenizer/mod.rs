//! Character-level tokenization of the full input into an offset-tagged
//! token stream.

/// The tokenizer state machine.
pub mod core;
/// Token types and the materialized token stream.
pub mod token;

pub use self::core::{tokenize, LexError, Tokenizer, TokenizerState};
pub use self::token::{Token, TokenKind, TokenStream};
