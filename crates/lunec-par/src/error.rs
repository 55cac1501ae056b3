//! Parse error types.

use thiserror::Error;

use lunec_util::{Diagnostic, Span};

/// Error produced by the parser
///
/// Every variant is fatal: the compiler reports one diagnostic and stops.
/// The span is the current token's span, or the previous token's span when
/// the stream ran out.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token that cannot legally appear in the current grammar position
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    /// The parser needed a token and none remained
    #[error("unexpected end of file: expected {expected}")]
    UnexpectedEof { expected: String, span: Span },

    /// An integer literal that does not fit in a signed 64-bit value
    #[error("integer literal does not fit in 64 bits")]
    IntegerOverflow { span: Span },

    /// A second `module` declaration
    #[error("duplicate `module` declaration")]
    DuplicateModule { span: Span },

    /// A `module` declaration after the first definition
    #[error("`module` declaration must appear before any definition")]
    MisplacedModule { span: Span },

    /// A parameter list entry with no `= type` part
    #[error("parameter `{name}` is missing a type")]
    ParameterWithoutType { name: String, span: Span },
}

impl ParseError {
    /// The source location the error points at.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::IntegerOverflow { span }
            | ParseError::DuplicateModule { span }
            | ParseError::MisplacedModule { span }
            | ParseError::ParameterWithoutType { span, .. } => *span,
        }
    }

    /// Convert into a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string(), self.span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_message() {
        let err = ParseError::UnexpectedToken {
            expected: "expression".into(),
            found: "`;`".into(),
            span: Span::new(12, 1),
        };
        assert_eq!(err.to_string(), "expected expression, found `;`");
        assert_eq!(err.span(), Span::new(12, 1));
    }

    #[test]
    fn test_eof_message() {
        let err = ParseError::UnexpectedEof {
            expected: "`;`".into(),
            span: Span::new(9, 1),
        };
        assert_eq!(err.to_string(), "unexpected end of file: expected `;`");
    }

    #[test]
    fn test_parameter_without_type_message() {
        let err = ParseError::ParameterWithoutType {
            name: "count".into(),
            span: Span::new(3, 5),
        };
        assert_eq!(err.to_string(), "parameter `count` is missing a type");
        assert_eq!(err.to_diagnostic().span, Span::new(3, 5));
    }
}
