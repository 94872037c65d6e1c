//! Integration tests for the tokenizer.

use lichen_html::{tokenize, LexError, Token, TokenKind, TokenizerState};

/// Helper to tokenize a string and return the materialized tokens.
fn lex(input: &str) -> Vec<Token> {
    tokenize(input)
        .expect("input should tokenize")
        .tokens()
        .to_vec()
}

/// Helper to collect just the token kinds.
fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|token| token.kind).collect()
}

#[test]
fn test_token_offsets_match_source() {
    let source = "<a href=\"x\">hi</a><br/><!--c--><?p?><!D>";
    let tokens = lex(source);
    assert!(!tokens.is_empty());
    for token in &tokens {
        assert_eq!(
            &source[token.start..token.end],
            token.text,
            "token {token} does not slice back to its own text"
        );
    }
    // Tokens come out in source order.
    for pair in tokens.windows(2) {
        assert!(pair[0].start <= pair[1].start);
    }
}

#[test]
fn test_simple_element() {
    let tokens = lex("<a href=\"x\">hi</a>");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Open,
            TokenKind::Name,
            TokenKind::Name,
            TokenKind::Eq,
            TokenKind::String,
            TokenKind::Close,
            TokenKind::Text,
            TokenKind::OpenEnd,
            TokenKind::Name,
            TokenKind::Close,
        ]
    );
    assert_eq!(tokens[1].text, "a");
    assert_eq!(tokens[2].text, "href");
    assert_eq!(tokens[4].text, "\"x\"");
    assert_eq!(tokens[6].text, "hi");
    assert_eq!(tokens[7].text, "</");
}

#[test]
fn test_self_closing_tag() {
    let tokens = lex("<img/>");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Open, TokenKind::Name, TokenKind::CloseEnd]
    );
    assert_eq!(tokens[2].text, "/>");
    assert_eq!(tokens[2].start, 4);
    assert_eq!(tokens[2].end, 6);
}

#[test]
fn test_comment_is_one_token() {
    let tokens = lex("a<!--b-->c");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Text, TokenKind::Comment, TokenKind::Text]
    );
    assert_eq!(tokens[1].text, "<!--b-->");
    assert_eq!(tokens[1].start, 1);
    assert_eq!(tokens[1].end, 9);
}

#[test]
fn test_comment_may_contain_markup() {
    let tokens = lex("<!--<bar/>-->");
    assert_eq!(kinds(&tokens), vec![TokenKind::Comment]);
    assert_eq!(tokens[0].text, "<!--<bar/>-->");
}

#[test]
fn test_preamble_and_doctype() {
    let tokens = lex("<?xml version=\"1.0\"?><!DOCTYPE html><x></x>");
    assert_eq!(tokens[0].kind, TokenKind::Preamble);
    assert_eq!(tokens[0].text, "<?xml version=\"1.0\"?>");
    assert_eq!(tokens[1].kind, TokenKind::Doctype);
    assert_eq!(tokens[1].text, "<!DOCTYPE html>");
    assert_eq!(tokens[2].kind, TokenKind::Open);
}

#[test]
fn test_whitespace_inside_tag() {
    let tokens = lex("<a  href = \"x\" >");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Open,
            TokenKind::Name,
            TokenKind::Name,
            TokenKind::Eq,
            TokenKind::String,
            TokenKind::Close,
        ]
    );
    // The name tokens cover only the name characters, never the padding.
    assert_eq!(tokens[2].text, "href");
}

#[test]
fn test_boolean_attribute_lexes_as_bare_name() {
    let tokens = lex("<input disabled>");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Open,
            TokenKind::Name,
            TokenKind::Name,
            TokenKind::Close,
        ]
    );
    assert_eq!(tokens[2].text, "disabled");
}

#[test]
fn test_empty_input() {
    let stream = tokenize("").expect("empty input should tokenize");
    assert!(stream.tokens().is_empty());
    assert_eq!(stream.peek().kind, TokenKind::Eof);
    assert_eq!(stream.peek().start, 0);
}

#[test]
fn test_eof_synthesized_past_end() {
    let mut stream = tokenize("hi").expect("text should tokenize");
    assert_eq!(stream.next().kind, TokenKind::Text);
    let eof = stream.next();
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.start, 2);
    assert_eq!(eof.end, 2);
    // Reading past the end keeps yielding EOF at the final offset.
    assert_eq!(stream.next().kind, TokenKind::Eof);
    assert_eq!(stream.peek().kind, TokenKind::Eof);
}

#[test]
fn test_unterminated_string() {
    let err = tokenize("<a x=\"abc>").expect_err("unterminated string should fail");
    assert_eq!(err, LexError::UnterminatedString { pos: 5 });
}

#[test]
fn test_unterminated_comment() {
    let err = tokenize("<!--abc").expect_err("unterminated comment should fail");
    assert_eq!(err, LexError::UnterminatedComment { pos: 0 });
}

#[test]
fn test_unterminated_doctype() {
    let err = tokenize("<!DOCTYPE html").expect_err("unterminated doctype should fail");
    assert_eq!(err, LexError::UnterminatedDoctype { pos: 0 });
}

#[test]
fn test_unterminated_preamble() {
    let err = tokenize("<?xml version=\"1.0\"").expect_err("unterminated preamble should fail");
    assert_eq!(err, LexError::UnterminatedPreamble { pos: 0 });
}

#[test]
fn test_input_ending_inside_tag() {
    let err = tokenize("<a").expect_err("dangling tag should fail");
    assert_eq!(
        err,
        LexError::UnexpectedEnd {
            pos: 2,
            state: TokenizerState::InElement,
        }
    );
}

#[test]
fn test_stray_character_after_slash() {
    let err = tokenize("<a /b>").expect_err("stray character after / should fail");
    match err {
        LexError::UnexpectedCharacter { pos, ch, state, .. } => {
            assert_eq!(pos, 4);
            assert_eq!(ch, 'b');
            assert_eq!(state, TokenizerState::CloserSeen);
        }
        other => panic!("expected UnexpectedCharacter, got {other:?}"),
    }
    // The message names the state and shows the recent tokens.
    let message = tokenize("<a /b>").expect_err("same failure").to_string();
    assert!(message.contains("CLOSER_SEEN"));
    assert!(message.contains("NAME"));
}

#[test]
fn test_bang_without_dashes_is_a_doctype() {
    // `<!` not followed by `--` is lexed as a doctype declaration.
    let tokens = lex("<a><!x></a>");
    assert_eq!(tokens[2].kind, TokenKind::Doctype);
    assert_eq!(tokens[2].text, "<!x>");
}
