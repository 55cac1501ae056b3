//! Core error types for the lunec-util crate.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for source file operations
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source file could not be opened or read
    #[error("couldn't read source file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for source file operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;
