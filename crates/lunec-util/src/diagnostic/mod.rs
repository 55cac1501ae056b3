//! Diagnostic module - Error reporting infrastructure.
//!
//! A [`Diagnostic`] is a plain value holding a severity, a message, and the
//! span it points at. Rendering against a [`SourceFile`] produces the fixed
//! report format:
//!
//! ```text
//! main.ln:1:13: error: expected expression, found `;`
//!   1 | def x = 1 + ;
//!     |             ^
//! ```
//!
//! The pipeline is fatal on the first error, so components return a single
//! diagnostic through `Result` instead of pushing into a shared handler;
//! tests capture the value directly.

use std::fmt;

use crate::span::{SourceFile, Span};

/// Diagnostic severity level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// An error that aborts compilation
    Error,
    /// A warning that does not abort compilation
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with severity and source location
///
/// # Examples
///
/// ```
/// use lunec_util::diagnostic::{Diagnostic, Level};
/// use lunec_util::span::Span;
///
/// let diag = Diagnostic::error("unexpected character '@'", Span::new(4, 1));
/// assert_eq!(diag.level, Level::Error);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level
    pub level: Level,
    /// Main message
    pub message: String,
    /// Source location the message points at
    pub span: Span,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    /// Render the diagnostic against its source file
    ///
    /// Produces the location header followed by the offending source line and
    /// a caret line: `^` under the first byte of the span, `~` under each
    /// following byte. The underline is clamped to the quoted line.
    pub fn render(&self, source: &SourceFile) -> String {
        let (line, col) = source.offset_to_line_col(self.span.start);
        let mut out = format!(
            "{}:{}:{}: {}: {}\n",
            source.path(),
            line,
            col,
            self.level,
            self.message
        );

        let line_text = source.line_at(line).unwrap_or(b"");
        let line_label = line.to_string();
        out.push_str(&format!(
            "  {} | {}\n",
            line_label,
            String::from_utf8_lossy(line_text)
        ));

        let pad = col - 1;
        let underline = self
            .span
            .len
            .max(1)
            .min(line_text.len().saturating_sub(pad).max(1));
        out.push_str(&format!(
            "  {} | {}^{}",
            " ".repeat(line_label.len()),
            " ".repeat(pad),
            "~".repeat(underline - 1)
        ));
        out
    }
}
