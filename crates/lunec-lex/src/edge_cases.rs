//! Edge case and property tests for the lexer.

use proptest::prelude::*;

use lunec_util::SourceFile;

use crate::{Lexer, LexError, Token, TokenKind};

fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let source = SourceFile::from_str("edge.ln", source);
    Lexer::new(&source).tokenize()
}

#[test]
fn test_adjacent_operators() {
    let kinds: Vec<_> = lex("1+-2").unwrap().iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            TokenKind::IntegerLiteral,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::IntegerLiteral,
        ]
    );
}

#[test]
fn test_equals_runs() {
    // `==>` is `=` then `=>`; `===` is three `=`.
    let kinds: Vec<_> = lex("==>").unwrap().iter().map(|t| t.kind).collect();
    assert_eq!(kinds, [TokenKind::AssignVariable, TokenKind::AssignBody]);

    let kinds: Vec<_> = lex("===").unwrap().iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            TokenKind::AssignVariable,
            TokenKind::AssignVariable,
            TokenKind::AssignVariable,
        ]
    );
}

#[test]
fn test_hash_then_paren_later() {
    // `#` immediately followed by anything but `(` is a line comment.
    let kinds: Vec<_> = lex("# (not a block\nx").unwrap().iter().map(|t| t.kind).collect();
    assert_eq!(kinds, [TokenKind::Identifier]);
}

#[test]
fn test_block_comment_with_stray_closers() {
    let kinds: Vec<_> = lex("#( a ) b # c )# ok").unwrap().iter().map(|t| t.kind).collect();
    assert_eq!(kinds, [TokenKind::Identifier]);
}

#[test]
fn test_long_identifier() {
    let name = "a".repeat(4096);
    let tokens = lex(&name).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].span.len, 4096);
}

#[test]
fn test_long_integer_is_lexed_whole() {
    // Overflow is the parser's concern; the lexer keeps the whole span.
    let tokens = lex("99999999999999999999").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[0].span.len, 20);
}

#[test]
fn test_carriage_return_is_rejected() {
    // Only space, tab and newline are whitespace.
    let err = lex("a\r\nb").unwrap_err();
    assert!(matches!(err, LexError::UnknownCharacter { byte: b'\r', .. }));
}

proptest! {
    /// Every token's span lies inside the source and spans never overlap.
    #[test]
    fn prop_spans_valid_and_ordered(src in "[a-z0-9 \t\n;,(){}:=+*/^#-]{0,80}") {
        let source = SourceFile::from_str("prop.ln", &src);
        if let Ok(tokens) = Lexer::new(&source).tokenize() {
            for token in &tokens {
                prop_assert!(token.span.len > 0);
                prop_assert!(token.span.end() <= source.len());
            }
            for pair in tokens.windows(2) {
                prop_assert!(pair[0].span.end() <= pair[1].span.start);
            }
        }
    }

    /// The lexeme behind each span re-classifies to the same token kind.
    #[test]
    fn prop_lexemes_round_trip(src in "[a-z0-9 \n;,(){}:=+*/^-]{0,80}") {
        let source = SourceFile::from_str("prop.ln", &src);
        if let Ok(tokens) = Lexer::new(&source).tokenize() {
            for token in tokens {
                let lexeme = source.lexeme(token.span).into_owned();
                let relexed_source = SourceFile::from_str("relex.ln", lexeme);
                let relexed = Lexer::new(&relexed_source).tokenize().unwrap();
                prop_assert_eq!(relexed.len(), 1);
                prop_assert_eq!(relexed[0].kind, token.kind);
            }
        }
    }

    /// Lexing is deterministic.
    #[test]
    fn prop_deterministic(src in "[a-z0-9 \t\n;,(){}:=+*/^#-]{0,80}") {
        let source = SourceFile::from_str("prop.ln", &src);
        let first = Lexer::new(&source).tokenize();
        let second = Lexer::new(&source).tokenize();
        prop_assert_eq!(first, second);
    }
}
