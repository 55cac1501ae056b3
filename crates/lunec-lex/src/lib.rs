//! lunec-lex - Lexical analyzer for the lune language.
//!
//! The lexer turns the raw bytes of a [`SourceFile`] into an ordered sequence
//! of [`Token`]s. It is a small finite state machine driven by a byte
//! [`Cursor`]: the normal state dispatches on the first byte of each token,
//! and the identifier/integer states consume their character class and rewind
//! one byte when they overshoot.
//!
//! Tokens never own their text; each carries a [`Span`](lunec_util::Span)
//! into the source buffer, so the whole token stream is allocation-free apart
//! from the output vector. There is no end-of-input sentinel token - the
//! stream simply ends.
//!
//! Lexing is fatal on the first error: an unknown byte or an unterminated
//! block comment aborts with a [`LexError`] carrying the offending span.
//!
//! # Example
//!
//! ```
//! use lunec_lex::{Lexer, TokenKind};
//! use lunec_util::SourceFile;
//!
//! let source = SourceFile::from_str("main.ln", "def x = 42;");
//! let tokens = Lexer::new(&source).tokenize().unwrap();
//!
//! let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::KwDef,
//!         TokenKind::Identifier,
//!         TokenKind::AssignVariable,
//!         TokenKind::IntegerLiteral,
//!         TokenKind::Semicolon,
//!     ]
//! );
//! ```

pub mod cursor;
mod error;
mod lexer;
pub mod token;

#[cfg(test)]
mod edge_cases;

pub use cursor::Cursor;
pub use error::LexError;
pub use lexer::Lexer;
pub use token::{keyword_from_ident, render_tokens, Token, TokenKind};
