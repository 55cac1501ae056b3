//! Comment skipping.
//!
//! Line comments run from `#` to the end of the line. Block comments run
//! from `#(` to the matching `)#` and do not nest; end of input inside one
//! is fatal.

use lunec_util::Span;

use crate::cursor::EOI;
use crate::error::LexError;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Skips a line comment; the leading `#` has already been consumed.
    pub(crate) fn skip_line_comment(&mut self) {
        loop {
            let byte = self.cursor.advance();
            if byte == EOI || byte == b'\n' {
                return;
            }
        }
    }

    /// Skips a block comment; the leading `#(` has already been consumed.
    ///
    /// `start` is the offset of the `#` so the unterminated-comment error
    /// points at the opener.
    pub(crate) fn skip_block_comment(&mut self, start: usize) -> Result<(), LexError> {
        loop {
            let byte = self.cursor.advance();
            if byte == EOI {
                return Err(LexError::UnterminatedBlockComment {
                    span: Span::new(start, 2),
                });
            }
            if byte == b')' && self.cursor.peek(0) == b'#' {
                self.cursor.advance();
                return Ok(());
            }
        }
    }
}
