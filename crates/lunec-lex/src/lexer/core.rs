//! Core lexer implementation.
//!
//! This module contains the main [`Lexer`] struct, the tokenize loop, and
//! the normal-state dispatch on the first byte of each token.

use lunec_util::{SourceFile, Span};

use crate::cursor::{Cursor, EOI};
use crate::error::LexError;
use crate::lexer::identifier::is_ident_start;
use crate::token::{Token, TokenKind};

/// Lexer for the lune language.
///
/// Consumes a [`SourceFile`] through a byte cursor and produces positioned
/// tokens. The first invalid byte aborts lexing with a [`LexError`].
pub struct Lexer<'a> {
    /// The source being lexed; tokens point into its bytes.
    pub(crate) source: &'a SourceFile,

    /// Byte cursor over the source.
    pub(crate) cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over the given source file.
    pub fn new(source: &'a SourceFile) -> Self {
        Self {
            source,
            cursor: Cursor::new(source.bytes()),
        }
    }

    /// Lexes the whole source into an ordered token sequence.
    ///
    /// Token spans are strictly increasing and never overlap. There is no
    /// end-of-input sentinel token; the vector simply ends.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or `None` at end of input.
    ///
    /// Whitespace and comments are consumed silently; everything else either
    /// starts a token or is an [`LexError::UnknownCharacter`].
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            let start = self.cursor.position();
            let byte = self.cursor.advance();

            let single = |kind| Token::new(kind, Span::new(start, 1));
            let token = match byte {
                EOI => return Ok(None),
                b' ' | b'\t' | b'\n' => continue,
                b'#' => {
                    if self.cursor.peek(0) == b'(' {
                        self.cursor.advance();
                        self.skip_block_comment(start)?;
                    } else {
                        self.skip_line_comment();
                    }
                    continue;
                }
                b'=' => {
                    if self.cursor.peek(0) == b'>' {
                        self.cursor.advance();
                        Token::new(TokenKind::AssignBody, Span::new(start, 2))
                    } else {
                        single(TokenKind::AssignVariable)
                    }
                }
                b':' => single(TokenKind::AssignConstant),
                b'(' => single(TokenKind::LParen),
                b')' => single(TokenKind::RParen),
                b'{' => single(TokenKind::LBrace),
                b'}' => single(TokenKind::RBrace),
                b';' => single(TokenKind::Semicolon),
                b',' => single(TokenKind::Comma),
                b'+' => single(TokenKind::Plus),
                b'-' => single(TokenKind::Minus),
                b'*' => single(TokenKind::Star),
                b'/' => single(TokenKind::Slash),
                b'^' => single(TokenKind::Caret),
                b if is_ident_start(b) => self.lex_word(start),
                b if b.is_ascii_digit() => self.lex_integer(start),
                b => {
                    return Err(LexError::UnknownCharacter {
                        byte: b,
                        span: Span::new(start, 1),
                    })
                }
            };
            return Ok(Some(token));
        }
    }
}
