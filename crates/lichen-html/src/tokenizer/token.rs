//! Offset-tagged tokens and the materialized token stream.

use core::fmt;

use lichen_dom::Span;
use strum_macros::Display;

/// The classification of a lexical unit.
///
/// The `Display` form is the screaming-snake name used in error messages
/// (`OPEN_END`, `NAME`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// `<` opening a start tag.
    Open,
    /// `>` closing a tag.
    Close,
    /// `</` opening a close tag.
    OpenEnd,
    /// `/>` self-closing a start tag.
    CloseEnd,
    /// A tag or attribute name.
    Name,
    /// A raw text run between tags.
    Text,
    /// `=` between an attribute name and its value.
    Eq,
    /// A double-quoted attribute value, surrounding quotes included.
    String,
    /// A whole `<!--...-->` comment.
    Comment,
    /// A whole `<!...>` doctype declaration.
    Doctype,
    /// A whole `<?...?>` preamble (XML declaration or processing
    /// instruction).
    Preamble,
    /// Synthesized at the final offset when reading past the last token.
    Eof,
}

/// A classified, offset-tagged lexical unit.
///
/// `text` is always exactly `source[start..end]`, so any token can be used to
/// slice the original input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Byte offset of the token's first byte in the source.
    pub start: usize,
    /// Byte offset one past the token's last byte; exclusive.
    pub end: usize,
    /// The exact source substring covered by the token.
    pub text: String,
    /// What kind of token this is.
    pub kind: TokenKind,
}

impl Token {
    /// The token's byte range as a [`Span`].
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The debug form of the text keeps newlines and tabs readable in
        // error snapshots.
        write!(f, "{} {:?} @{}..{}", self.kind, self.text, self.start, self.end)
    }
}

/// The eagerly materialized token stream with one-token lookahead.
///
/// [`TokenStream::peek`] and [`TokenStream::next`] past the last real token
/// yield an [`TokenKind::Eof`] token positioned at the end of the input, so
/// a consumer never has to special-case exhaustion.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
    eof: Token,
}

impl TokenStream {
    /// Wrap a token vector; `end` is the input length, where the synthesized
    /// end-of-file token sits.
    #[must_use]
    pub const fn new(tokens: Vec<Token>, end: usize) -> Self {
        Self {
            tokens,
            cursor: 0,
            eof: Token {
                start: end,
                end,
                text: String::new(),
                kind: TokenKind::Eof,
            },
        }
    }

    /// Look at the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> &Token {
        self.tokens.get(self.cursor).unwrap_or(&self.eof)
    }

    /// Consume and return the next token.
    pub fn next(&mut self) -> Token {
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                token.clone()
            }
            None => self.eof.clone(),
        }
    }

    /// All tokens in source order, ignoring the cursor.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
