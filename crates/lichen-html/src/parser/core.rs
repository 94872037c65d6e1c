//! Recursive-descent tree construction over the token stream.

use std::collections::HashSet;

use lichen_dom::{Attribute, DomTree, ElementData, NodeId, NodeKind, Span, TextData};
use thiserror::Error;

use crate::tokenizer::{LexError, Token, TokenKind, TokenStream, Tokenizer};

/// The standard HTML void elements: tags that never take children or a close
/// tag, even when written without `/>`.
pub const DEFAULT_VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// A structural failure: a token kind invalid for the current grammar
/// position, or a close tag that does not match its open tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A specific token kind was required and something else appeared.
    #[error("expected {expected} token, found {found} {text:?} at offset {pos}")]
    UnexpectedToken {
        /// The kind the grammar required here.
        expected: TokenKind,
        /// The kind actually found.
        found: TokenKind,
        /// The found token's source text.
        text: String,
        /// Byte offset of the found token.
        pos: usize,
    },

    /// A token kind that can never start a node appeared in content
    /// position.
    #[error("unexpected {found} token {text:?} at offset {pos}")]
    UnexpectedContent {
        /// The kind found in content position.
        found: TokenKind,
        /// The found token's source text.
        text: String,
        /// Byte offset of the found token.
        pos: usize,
    },

    /// An open tag was not closed by `>` or `/>`.
    #[error("expected > or /> after <{tag}, found {found} {text:?} at offset {pos}")]
    TagCloseExpected {
        /// The tag whose open tag is unfinished.
        tag: String,
        /// The kind actually found.
        found: TokenKind,
        /// The found token's source text.
        text: String,
        /// Byte offset of the found token.
        pos: usize,
    },

    /// A close tag's name does not match its open tag's name.
    #[error("wrong close tag: expected </{expected}>, found </{found}> at offset {pos}")]
    MismatchedCloseTag {
        /// The open tag's name.
        expected: String,
        /// The close tag's name.
        found: String,
        /// Byte offset of the close tag's `</`.
        pos: usize,
    },
}

/// Either kind of parse failure. A failing parse returns no document; there
/// is no partial-tree or error-recovery mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The tokenizer rejected the input.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The token stream did not form a well-formed document.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

/// A parsed `</name>` close tag. Parser-internal: it exists to validate the
/// tag name and to hand its span to the owning element, then is discarded.
struct CloseTag {
    open_end: Token,
    name: Token,
    close: Token,
}

impl CloseTag {
    fn span(&self) -> Span {
        Span::new(self.open_end.start, self.close.end)
    }
}

/// Recursive-descent parser with one-token lookahead.
///
/// Construction tokenizes the whole input eagerly; [`Parser::parse_document`]
/// then builds the tree in a single pass over the stream.
pub struct Parser {
    stream: TokenStream,
    void_elements: HashSet<String>,
}

impl Parser {
    /// Tokenize `input` and set up a parser with the default void-element
    /// set ([`DEFAULT_VOID_ELEMENTS`]).
    ///
    /// # Errors
    ///
    /// Returns the [`LexError`] when tokenization fails.
    pub fn new(input: &str) -> Result<Self, LexError> {
        let mut tokenizer = Tokenizer::new(input.to_string());
        tokenizer.run()?;
        Ok(Parser {
            stream: tokenizer.into_stream(),
            void_elements: DEFAULT_VOID_ELEMENTS
                .iter()
                .map(|tag| (*tag).to_string())
                .collect(),
        })
    }

    /// Replace the void-element set. Lookup is ASCII case-insensitive.
    #[must_use]
    pub fn with_void_elements<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.void_elements = tags
            .into_iter()
            .map(|tag| tag.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Build the document tree from the token stream.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] when a token kind is invalid for the
    /// current grammar position or a close tag does not match its open tag.
    pub fn parse_document(mut self) -> Result<DomTree, SyntaxError> {
        let mut tree = DomTree::new();
        self.parse_node_list(&mut tree, NodeId::ROOT)?;

        // The node-list loop stops on OPEN_END as well as EOF; at document
        // level a dangling close tag is an error, not a stop condition.
        let trailing = self.stream.peek();
        if trailing.kind == TokenKind::Eof {
            Ok(tree)
        } else {
            Err(SyntaxError::UnexpectedContent {
                found: trailing.kind,
                text: trailing.text.clone(),
                pos: trailing.start,
            })
        }
    }

    /// Parse nodes and append them to `parent` until an `OPEN_END` or `EOF`
    /// token stops the list.
    fn parse_node_list(&mut self, tree: &mut DomTree, parent: NodeId) -> Result<(), SyntaxError> {
        loop {
            match self.stream.peek().kind {
                TokenKind::Open => {
                    let _ = self.parse_element(tree, parent)?;
                }
                TokenKind::Text => self.parse_text(tree, parent),
                // Not part of the tree; consumed and discarded.
                TokenKind::Comment | TokenKind::Preamble | TokenKind::Doctype => {
                    let _ = self.stream.next();
                }
                TokenKind::OpenEnd | TokenKind::Eof => return Ok(()),
                _ => {
                    let token = self.stream.peek();
                    return Err(SyntaxError::UnexpectedContent {
                        found: token.kind,
                        text: token.text.clone(),
                        pos: token.start,
                    });
                }
            }
        }
    }

    fn parse_text(&mut self, tree: &mut DomTree, parent: NodeId) {
        let token = self.stream.next();
        let span = token.span();
        let id = tree.alloc(NodeKind::Text(TextData {
            text: token.text,
            span,
        }));
        tree.append_child(parent, id);
    }

    /// Parse one element: open tag, attributes, and (unless the element is
    /// void or self-closed) its children and close tag.
    ///
    /// The element node is allocated before its subtree is parsed so it can
    /// serve as the parent for its children; its close-tag span is the one
    /// field filled in afterwards.
    fn parse_element(&mut self, tree: &mut DomTree, parent: NodeId) -> Result<NodeId, SyntaxError> {
        let open = self.expect(TokenKind::Open)?;
        let name = self.expect(TokenKind::Name)?;

        let mut attributes = Vec::new();
        while self.stream.peek().kind == TokenKind::Name {
            attributes.push(self.parse_attribute()?);
        }

        let close = self.stream.next();
        if close.kind != TokenKind::Close && close.kind != TokenKind::CloseEnd {
            return Err(SyntaxError::TagCloseExpected {
                tag: name.text,
                found: close.kind,
                text: close.text,
                pos: close.start,
            });
        }

        let id = tree.alloc(NodeKind::Element(ElementData {
            tag_name: name.text.clone(),
            open_span: open.span(),
            name_span: name.span(),
            attributes,
            close_span: close.span(),
            close_tag_span: None,
        }));
        tree.append_child(parent, id);

        if close.kind == TokenKind::CloseEnd || self.is_void(&name.text) {
            return Ok(id);
        }

        self.parse_node_list(tree, id)?;

        let close_tag = self.parse_close_tag()?;
        if close_tag.name.text != name.text {
            return Err(SyntaxError::MismatchedCloseTag {
                expected: name.text,
                found: close_tag.name.text,
                pos: close_tag.open_end.start,
            });
        }
        tree.complete_element(id, close_tag.span());

        Ok(id)
    }

    /// Parse `</`, a name, and `>`.
    fn parse_close_tag(&mut self) -> Result<CloseTag, SyntaxError> {
        let open_end = self.expect(TokenKind::OpenEnd)?;
        let name = self.expect(TokenKind::Name)?;
        let close = self.expect(TokenKind::Close)?;
        Ok(CloseTag {
            open_end,
            name,
            close,
        })
    }

    /// Parse an attribute: a name, optionally followed by `=` and a quoted
    /// value.
    fn parse_attribute(&mut self) -> Result<Attribute, SyntaxError> {
        let name = self.expect(TokenKind::Name)?;

        let (raw_value, value_span) = if self.stream.peek().kind == TokenKind::Eq {
            let _ = self.stream.next();
            let value = self.expect(TokenKind::String)?;
            let span = value.span();
            (Some(value.text), Some(span))
        } else {
            // Boolean-attribute form: a bare name with no value.
            (None, None)
        };

        let name_span = name.span();
        Ok(Attribute {
            name: name.text,
            name_span,
            raw_value,
            value_span,
        })
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token, SyntaxError> {
        let token = self.stream.next();
        if token.kind == expected {
            Ok(token)
        } else {
            Err(SyntaxError::UnexpectedToken {
                expected,
                found: token.kind,
                text: token.text,
                pos: token.start,
            })
        }
    }

    fn is_void(&self, tag: &str) -> bool {
        self.void_elements.contains(&tag.to_ascii_lowercase())
    }
}
