//! The character-level tokenizer state machine.

use strum_macros::Display;
use thiserror::Error;

use super::token::{Token, TokenKind, TokenStream};

/// The tokenizer's logical states.
///
/// The `Display` form is the screaming-snake name used in lexical error
/// messages, replacing any need for runtime introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenizerState {
    /// Between tags: text runs, and the dispatch point for `<`, `<?`, `<!`.
    Initial,
    /// A `<` has been seen; deciding between a start tag, a close tag, and
    /// a comment.
    OpenSeen,
    /// Inside a tag: names, `=`, quoted strings, `/`, `>`.
    InElement,
    /// A `/` has been seen inside a tag; only `>` may follow.
    CloserSeen,
    /// `<!` has been seen; one `-` is needed to stay on the comment path.
    CommentOpen,
    /// `<!-` has been seen; a second `-` confirms the comment.
    CommentOpenDash,
}

/// A lexical failure: the tokenizer could not classify the input under the
/// current state, or a delimited construct never terminated.
///
/// Every variant carries the byte offset of the offending position;
/// [`LexError::UnexpectedCharacter`] additionally snapshots the most recent
/// tokens for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character the current state cannot accept.
    #[error("unexpected character {ch:?} at offset {pos} in {state} state; recent tokens: [{recent}]")]
    UnexpectedCharacter {
        /// Byte offset of the character.
        pos: usize,
        /// The character itself.
        ch: char,
        /// The state the tokenizer was in.
        state: TokenizerState,
        /// Display forms of up to the last ten tokens produced.
        recent: String,
    },

    /// A `"`-delimited string with no closing quote before end of input.
    #[error("unterminated string starting at offset {pos}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        pos: usize,
    },

    /// A `<!--` comment with no `-->` before end of input.
    #[error("unterminated comment starting at offset {pos}")]
    UnterminatedComment {
        /// Byte offset of the `<`.
        pos: usize,
    },

    /// A `<!` doctype with no `>` before end of input.
    #[error("unterminated doctype starting at offset {pos}")]
    UnterminatedDoctype {
        /// Byte offset of the `<`.
        pos: usize,
    },

    /// A `<?` preamble with no `?>` before end of input.
    #[error("unterminated preamble starting at offset {pos}")]
    UnterminatedPreamble {
        /// Byte offset of the `<`.
        pos: usize,
    },

    /// The input ended while still inside a tag.
    #[error("unterminated tag: input ended at offset {pos} in {state} state")]
    UnexpectedEnd {
        /// The input length, where scanning stopped.
        pos: usize,
        /// The non-initial state the tokenizer was left in.
        state: TokenizerState,
    },
}

/// The tokenizer: a single forward pass over the input, producing the whole
/// token stream eagerly.
///
/// Offsets are byte positions. All structurally significant characters are
/// ASCII, so the scan works on bytes; names and text runs pass multi-byte
/// characters through untouched.
pub struct Tokenizer {
    input: String,
    pos: usize,
    /// Start offset of the multi-character token currently being assembled.
    start: usize,
    state: TokenizerState,
    tokens: Vec<Token>,
}

impl Tokenizer {
    /// Create a tokenizer over the full input text.
    #[must_use]
    pub const fn new(input: String) -> Self {
        Tokenizer {
            input,
            pos: 0,
            start: 0,
            state: TokenizerState::Initial,
            tokens: Vec::new(),
        }
    }

    /// Scan the whole input.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] when a character cannot be classified under the
    /// current state, when a string, comment, doctype, or preamble never
    /// terminates, or when the input ends inside a tag.
    pub fn run(&mut self) -> Result<(), LexError> {
        while self.pos < self.input.len() {
            match self.state {
                TokenizerState::Initial => self.scan_initial()?,
                TokenizerState::OpenSeen => self.scan_open_seen(),
                TokenizerState::InElement => self.scan_in_element()?,
                TokenizerState::CloserSeen => self.scan_closer_seen()?,
                TokenizerState::CommentOpen | TokenizerState::CommentOpenDash => {
                    self.scan_comment_open()?;
                }
            }
        }

        if self.state == TokenizerState::Initial {
            Ok(())
        } else {
            Err(LexError::UnexpectedEnd {
                pos: self.pos,
                state: self.state,
            })
        }
    }

    /// Consume the tokenizer and return the stream for the parser.
    #[must_use]
    pub fn into_stream(self) -> TokenStream {
        let end = self.input.len();
        TokenStream::new(self.tokens, end)
    }

    // =========================================================================
    // State handlers
    // =========================================================================

    fn scan_initial(&mut self) -> Result<(), LexError> {
        if self.byte() == b'<' {
            if self.looking_at("<?") {
                self.read_preamble()
            } else if self.looking_at("<!") && !self.looking_at("<!--") {
                self.read_doctype()
            } else {
                // Plain `<` or the start of `<!--`; both run through OpenSeen.
                self.start = self.pos;
                self.pos += 1;
                self.state = TokenizerState::OpenSeen;
                Ok(())
            }
        } else {
            self.read_text();
            Ok(())
        }
    }

    fn scan_open_seen(&mut self) {
        match self.byte() {
            b'/' => {
                self.push_token(TokenKind::OpenEnd, self.start, self.pos + 1);
                self.pos += 1;
                self.state = TokenizerState::InElement;
            }
            b'!' => {
                self.pos += 1;
                self.state = TokenizerState::CommentOpen;
            }
            b if Self::is_space(b) => self.pos += 1,
            _ => {
                self.push_token(TokenKind::Open, self.start, self.start + 1);
                self.read_name();
                self.state = TokenizerState::InElement;
            }
        }
    }

    fn scan_in_element(&mut self) -> Result<(), LexError> {
        match self.byte() {
            b if Self::is_space(b) => self.pos += 1,
            b'=' => {
                self.push_token(TokenKind::Eq, self.pos, self.pos + 1);
                self.pos += 1;
            }
            b'"' => self.read_string()?,
            b'/' => {
                self.start = self.pos;
                self.pos += 1;
                self.state = TokenizerState::CloserSeen;
            }
            b'>' => {
                self.push_token(TokenKind::Close, self.pos, self.pos + 1);
                self.pos += 1;
                self.state = TokenizerState::Initial;
            }
            _ => self.read_name(),
        }
        Ok(())
    }

    fn scan_closer_seen(&mut self) -> Result<(), LexError> {
        if self.byte() == b'>' {
            self.push_token(TokenKind::CloseEnd, self.start, self.pos + 1);
            self.pos += 1;
            self.state = TokenizerState::Initial;
            Ok(())
        } else {
            Err(self.unexpected_character())
        }
    }

    fn scan_comment_open(&mut self) -> Result<(), LexError> {
        if self.byte() != b'-' {
            return Err(self.unexpected_character());
        }
        self.pos += 1;
        if self.state == TokenizerState::CommentOpen {
            self.state = TokenizerState::CommentOpenDash;
            Ok(())
        } else {
            self.read_comment()
        }
    }

    // =========================================================================
    // Multi-character reads
    // =========================================================================

    /// A maximal run of characters up to the next `<` or end of input.
    fn read_text(&mut self) {
        let start = self.pos;
        while self.pos < self.input.len() && self.byte() != b'<' {
            self.pos += 1;
        }
        self.push_token(TokenKind::Text, start, self.pos);
    }

    /// A maximal run of name characters: anything but whitespace, `=`, `/`,
    /// and `>`. The terminating delimiter is left unconsumed.
    fn read_name(&mut self) {
        let start = self.pos;
        while self.pos < self.input.len() && Self::is_name_byte(self.byte()) {
            self.pos += 1;
        }
        self.push_token(TokenKind::Name, start, self.pos);
    }

    /// A `"`-delimited string, both quotes included in the token.
    fn read_string(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        match self.find_from(self.pos + 1, "\"") {
            Some(quote) => {
                self.pos = quote + 1;
                self.push_token(TokenKind::String, start, self.pos);
                Ok(())
            }
            None => Err(LexError::UnterminatedString { pos: start }),
        }
    }

    /// The remainder of a `<!--...-->` comment; both dashes after `<!` have
    /// already been consumed.
    fn read_comment(&mut self) -> Result<(), LexError> {
        match self.find_from(self.pos, "-->") {
            Some(closer) => {
                self.pos = closer + 3;
                self.push_token(TokenKind::Comment, self.start, self.pos);
                self.state = TokenizerState::Initial;
                Ok(())
            }
            None => Err(LexError::UnterminatedComment { pos: self.start }),
        }
    }

    /// A whole `<!...>` doctype declaration.
    fn read_doctype(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        match self.find_from(self.pos, ">") {
            Some(closer) => {
                self.pos = closer + 1;
                self.push_token(TokenKind::Doctype, start, self.pos);
                Ok(())
            }
            None => Err(LexError::UnterminatedDoctype { pos: start }),
        }
    }

    /// A whole `<?...?>` preamble.
    fn read_preamble(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        match self.find_from(self.pos, "?>") {
            Some(closer) => {
                self.pos = closer + 2;
                self.push_token(TokenKind::Preamble, start, self.pos);
                Ok(())
            }
            None => Err(LexError::UnterminatedPreamble { pos: start }),
        }
    }

    // =========================================================================
    // Scanning helpers
    // =========================================================================

    /// The byte at the current position. Only called while `pos` is in
    /// bounds.
    fn byte(&self) -> u8 {
        self.input.as_bytes()[self.pos]
    }

    /// Whether the input at the current position starts with `target`.
    fn looking_at(&self, target: &str) -> bool {
        self.input.as_bytes()[self.pos..].starts_with(target.as_bytes())
    }

    /// Find the next occurrence of `needle` at or after `from`, as an
    /// absolute byte offset.
    fn find_from(&self, from: usize, needle: &str) -> Option<usize> {
        if from > self.input.len() {
            return None;
        }
        self.input[from..].find(needle).map(|found| from + found)
    }

    fn push_token(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(Token {
            start,
            end,
            text: self.input[start..end].to_string(),
            kind,
        });
    }

    fn unexpected_character(&self) -> LexError {
        let ch = self.input[self.pos..].chars().next().unwrap_or('\0');
        LexError::UnexpectedCharacter {
            pos: self.pos,
            ch,
            state: self.state,
            recent: self.recent_tokens(),
        }
    }

    /// Display forms of up to the last ten tokens, for error snapshots.
    fn recent_tokens(&self) -> String {
        let from = self.tokens.len().saturating_sub(10);
        self.tokens[from..]
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    const fn is_space(b: u8) -> bool {
        matches!(b, b' ' | b'\t' | b'\r' | b'\n')
    }

    const fn is_name_byte(b: u8) -> bool {
        !Self::is_space(b) && !matches!(b, b'=' | b'/' | b'>')
    }
}

/// Tokenize the whole input in one call.
///
/// # Errors
///
/// Returns a [`LexError`] as described on [`Tokenizer::run`].
pub fn tokenize(input: &str) -> Result<TokenStream, LexError> {
    let mut tokenizer = Tokenizer::new(input.to_string());
    tokenizer.run()?;
    Ok(tokenizer.into_stream())
}
