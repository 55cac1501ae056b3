//! lunec-drv - Compiler driver.
//!
//! Wires the pipeline together: read one source file, lex it, parse it, and
//! print the requested dumps. The front-end is fatal on the first error -
//! any failing phase yields exactly one rendered diagnostic and the binary
//! exits with a non-zero status.
//!
//! ```text
//! Source file (.ln)
//!       |
//!       v
//!   [lunec-lex] --> token stream     (--emit-tokens)
//!       |
//!       v
//!   [lunec-par] --> AST arena        (default output)
//! ```
//!
//! Semantic analysis and code generation hang off the AST later; today the
//! printed tree is the compiler's product and what the integration tests
//! assert against.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use lunec_lex::{render_tokens, Lexer};
use lunec_par::Parser;
use lunec_util::{Diagnostic, SourceError, SourceFile};

/// Driver configuration, usually filled from the command line
#[derive(Clone, Debug)]
pub struct Config {
    /// Source file to compile
    pub input: PathBuf,

    /// Print the token stream dump
    pub emit_tokens: bool,

    /// Print the AST dump; implied when no emit flag is set
    pub emit_ast: bool,
}

impl Config {
    /// Configuration with default outputs for the given input file.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            emit_tokens: false,
            emit_ast: false,
        }
    }

    /// The AST dump is the default product when nothing was requested.
    fn wants_ast(&self) -> bool {
        self.emit_ast || !self.emit_tokens
    }
}

/// Top-level driver failure
#[derive(Debug, Error)]
pub enum DriverError {
    /// The input file could not be read
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A phase reported a diagnostic; `rendered` is the full report
    #[error("{rendered}")]
    Compile { rendered: String },
}

impl DriverError {
    /// The message to print on stderr before exiting with code 1.
    pub fn render(&self) -> String {
        match self {
            DriverError::Source(err) => format!("error: {err}"),
            DriverError::Compile { rendered } => rendered.clone(),
        }
    }
}

/// Run the whole pipeline for the configured input file.
///
/// Returns the text to print on stdout. On failure the returned error
/// carries one fully rendered diagnostic.
pub fn run(config: &Config) -> Result<String, DriverError> {
    let source = SourceFile::open(&config.input)?;
    debug!(path = source.path(), bytes = source.len(), "read source");

    compile_source(&source, config).map_err(|diagnostic| DriverError::Compile {
        rendered: diagnostic.render(&source),
    })
}

/// Lex and parse one in-memory source, producing the requested dumps.
///
/// Both phases always run, even when only the token dump was requested, so
/// diagnostics do not depend on the output selection.
pub fn compile_source(source: &SourceFile, config: &Config) -> Result<String, Diagnostic> {
    let tokens = Lexer::new(source)
        .tokenize()
        .map_err(|err| err.to_diagnostic())?;
    debug!(tokens = tokens.len(), "lexed");

    let mut output = String::new();
    if config.emit_tokens {
        output.push_str(&render_tokens(source, &tokens));
    }

    let ast = Parser::parse(source, &tokens).map_err(|err| err.to_diagnostic())?;
    debug!(nodes = ast.len(), "parsed");

    if config.wants_ast() {
        output.push_str(&ast.to_string());
    }
    Ok(output)
}
