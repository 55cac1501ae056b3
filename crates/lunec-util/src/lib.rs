//! lunec-util - Core utilities shared by every phase of the lune compiler.
//!
//! This crate provides the foundation types the front-end is built on:
//!
//! - [`span`] - byte ranges into source code and the [`SourceFile`] that owns
//!   the bytes, including line/column resolution.
//! - [`diagnostic`] - renderable error messages with source snippets.
//! - [`index_vec`] - a vector addressed by a typed index, used as the backing
//!   store for the AST arena.
//! - [`error`] - error types for the operations in this crate.
//!
//! Everything here is single-threaded by design; diagnostics are plain values
//! that callers thread through the pipeline instead of a global sink.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;

pub use diagnostic::{Diagnostic, Level};
pub use error::SourceError;
pub use index_vec::{Idx, IndexVec};
pub use span::{SourceFile, Span};
