//! Source file storage and line/column resolution.
//!
//! A [`SourceFile`] owns the raw bytes of one compilation unit for the whole
//! pipeline; tokens and diagnostics reference it through byte spans.

use std::borrow::Cow;
use std::path::Path;

use crate::error::{SourceError, SourceResult};

use super::Span;

/// The bytes of one source file together with its display path
///
/// The buffer is immutable after construction. Line start offsets are
/// precomputed so byte offsets can be resolved to 1-based line/column pairs
/// with a binary search.
///
/// # Examples
///
/// ```
/// use lunec_util::span::SourceFile;
///
/// let file = SourceFile::from_str("main.ln", "def x = 1;\ndef y = 2;\n");
/// assert_eq!(file.offset_to_line_col(0), (1, 1));
/// assert_eq!(file.offset_to_line_col(11), (2, 1));
/// ```
#[derive(Clone)]
pub struct SourceFile {
    /// Display path (file path or synthetic name for in-memory buffers)
    path: String,
    /// Raw file content
    bytes: Vec<u8>,
    /// Byte offset of the start of each line
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Read an entire file into an immutable buffer
    pub fn open(path: impl AsRef<Path>) -> SourceResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_bytes(path.display().to_string(), bytes))
    }

    /// Create a source file from an in-memory byte buffer
    pub fn from_bytes(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        let line_starts = Self::compute_line_starts(&bytes);
        Self {
            path: path.into(),
            bytes,
            line_starts,
        }
    }

    /// Create a source file from an in-memory string
    pub fn from_str(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::from_bytes(path, content.into().into_bytes())
    }

    fn compute_line_starts(bytes: &[u8]) -> Vec<usize> {
        let mut line_starts = vec![0];
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        line_starts
    }

    /// Get the display path
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the raw content
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Buffer length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the file is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Get the bytes covered by a span
    ///
    /// # Panics
    ///
    /// Panics if the span is out of bounds.
    #[inline]
    pub fn slice(&self, span: Span) -> &[u8] {
        &self.bytes[span.start..span.end()]
    }

    /// Get the text covered by a span
    ///
    /// Invalid UTF-8 is replaced, which only happens for spans that the lexer
    /// would have rejected anyway.
    pub fn lexeme(&self, span: Span) -> Cow<'_, str> {
        String::from_utf8_lossy(self.slice(span))
    }

    /// Total number of lines
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to 1-based (line, column) coordinates
    ///
    /// Column is measured in bytes from the start of the line, so
    /// `column == offset - line_start + 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lunec_util::span::SourceFile;
    ///
    /// let file = SourceFile::from_str("main.ln", "def x = 1;");
    /// assert_eq!(file.offset_to_line_col(4), (1, 5));
    /// ```
    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => (line + 1, 1),
            Err(insert_point) => {
                let line = insert_point - 1;
                let line_start = self.line_starts[line];
                (line + 1, offset - line_start + 1)
            }
        }
    }

    /// Get a source line (1-based), without its trailing newline
    pub fn line_at(&self, line: usize) -> Option<&[u8]> {
        let start = self.line_starts.get(line - 1).copied()?;
        let end = self
            .line_starts
            .get(line)
            .copied()
            .unwrap_or(self.bytes.len());

        let mut line_bytes = &self.bytes[start..end];
        while let [rest @ .., b'\n' | b'\r'] = line_bytes {
            line_bytes = rest;
        }
        Some(line_bytes)
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("len", &self.len())
            .field("line_count", &self.line_count())
            .finish()
    }
}
