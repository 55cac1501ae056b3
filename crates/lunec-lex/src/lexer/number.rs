//! Integer literal lexing.

use lunec_util::Span;

use crate::cursor::EOI;
use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an integer literal starting at `start`.
    ///
    /// The first digit has already been consumed. Consumes digits until the
    /// first non-digit and rewinds that one byte. The digits are not
    /// converted here; the parser converts them so overflow can be reported
    /// with the literal's span.
    pub(crate) fn lex_integer(&mut self, start: usize) -> Token {
        loop {
            let byte = self.cursor.advance();
            if byte.is_ascii_digit() {
                continue;
            }
            if byte != EOI {
                self.cursor.rewind();
            }
            break;
        }

        let span = Span::new(start, self.cursor.position() - start);
        Token::new(TokenKind::IntegerLiteral, span)
    }
}
