//! Identifier and keyword lexing.

use lunec_util::Span;

use crate::cursor::EOI;
use crate::token::{keyword_from_ident, Token, TokenKind};
use crate::Lexer;

/// Returns true for bytes that may start an identifier: `[A-Za-z_]`.
#[inline]
pub(crate) fn is_ident_start(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphabetic()
}

/// Returns true for bytes that may continue an identifier: `[A-Za-z_0-9]`.
#[inline]
pub(crate) fn is_ident_continue(byte: u8) -> bool {
    is_ident_start(byte) || byte.is_ascii_digit()
}

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword starting at `start`.
    ///
    /// The first byte has already been consumed. Consumes identifier bytes
    /// until the first non-member, rewinds that one byte, then classifies
    /// the lexeme against the keyword set.
    pub(crate) fn lex_word(&mut self, start: usize) -> Token {
        loop {
            let byte = self.cursor.advance();
            if is_ident_continue(byte) {
                continue;
            }
            if byte != EOI {
                self.cursor.rewind();
            }
            break;
        }

        let span = Span::new(start, self.cursor.position() - start);
        let kind = keyword_from_ident(self.source.slice(span)).unwrap_or(TokenKind::Identifier);
        Token::new(kind, span)
    }
}
