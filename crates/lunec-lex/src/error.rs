//! Lexical error types.

use thiserror::Error;

use lunec_util::{Diagnostic, Span};

fn printable(byte: &u8) -> String {
    char::from(*byte).escape_default().to_string()
}

/// Error produced by the lexer
///
/// Both variants are fatal: the compiler reports one diagnostic and stops.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A byte not permitted in the current lexer state
    #[error("'{}' is not a valid character", printable(.byte))]
    UnknownCharacter { byte: u8, span: Span },

    /// End of input reached inside a `#( ... )#` comment
    #[error("unterminated block comment")]
    UnterminatedBlockComment { span: Span },
}

impl LexError {
    /// The source location the error points at.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnknownCharacter { span, .. } => *span,
            LexError::UnterminatedBlockComment { span } => *span,
        }
    }

    /// Convert into a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string(), self.span())
    }
}
