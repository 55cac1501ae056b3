//! lunec-par - Parser for the lune language.
//!
//! Consumes the token stream produced by `lunec-lex` and builds an [`Ast`]:
//! a single arena of nodes addressed by [`NodeId`], with the `Module` root
//! at index 0. Children reference parents and parents reference children by
//! index, which keeps the otherwise-cyclic relationship safe and makes the
//! expression parser's re-rooting step a pair of field updates (see the
//! `expr` module).
//!
//! The grammar, top to bottom:
//!
//! ```text
//! source     = [ "module" ident ";" ] definition* ;
//! definition = "def" ident (":" | "=") expression ";" ;
//! statement  = definition | block | expression ";" ;
//! block      = "{" statement* "}" ;
//! function   = "fn" "(" params? ")" ident? "=>" statement ;
//! params     = ident "=" ident ( "," ident "=" ident )* ;
//! expression = primary ( operator primary )* ;
//! primary    = integer | ident | function | "(" expression ")" ;
//! ```
//!
//! Parsing is fatal on the first error; every routine returns
//! `Result<_, ParseError>` and the driver renders exactly one diagnostic.
//!
//! # Example
//!
//! ```
//! use lunec_lex::Lexer;
//! use lunec_par::Parser;
//! use lunec_util::SourceFile;
//!
//! let source = SourceFile::from_str("main.ln", "def x = 1 + 2 * 3;");
//! let tokens = Lexer::new(&source).tokenize().unwrap();
//! let ast = Parser::parse(&source, &tokens).unwrap();
//! assert_eq!(ast.to_string(), "Var x = (+ 1 (* 2 3))");
//! ```

mod ast;
mod error;
mod expr;
mod stmt;

pub use ast::{prec, Ast, BinOp, Node, NodeId, NodeKind};
pub use error::ParseError;

use lunec_lex::{Token, TokenKind};
use lunec_util::{SourceFile, Span};

/// Recursive descent parser with an iterative expression core
///
/// Holds a cursor over the token slice, the source (for lexemes and error
/// spans), and the arena under construction.
pub struct Parser<'a> {
    /// Source the tokens point into
    source: &'a SourceFile,

    /// Token stream from the lexer
    tokens: &'a [Token],

    /// Current position in the token stream
    position: usize,

    /// The tree being built
    ast: Ast,
}

impl<'a> Parser<'a> {
    /// Parse a whole token stream into an AST.
    ///
    /// The returned arena always has the `Module` root at index 0, even for
    /// empty input.
    pub fn parse(source: &'a SourceFile, tokens: &'a [Token]) -> Result<Ast, ParseError> {
        let mut parser = Parser {
            source,
            tokens,
            position: 0,
            ast: Ast::new(Span::new(0, source.len())),
        };
        parser.parse_source()?;
        Ok(parser.ast)
    }

    /// Module scope: an optional `module` declaration and definitions.
    fn parse_source(&mut self) -> Result<(), ParseError> {
        let mut seen_definition = false;
        while let Some(token) = self.current() {
            match token.kind {
                TokenKind::KwModule => self.parse_module_decl(seen_definition)?,
                TokenKind::KwDef => {
                    seen_definition = true;
                    self.parse_definition(Ast::ROOT)?;
                }
                _ => return Err(self.unexpected("`module` or `def`")),
            }
        }
        Ok(())
    }

    /// Parse `module <name> ;`.
    ///
    /// Legal at most once, and only before the first definition.
    fn parse_module_decl(&mut self, seen_definition: bool) -> Result<(), ParseError> {
        let kw = self.expect(TokenKind::KwModule, "`module`")?;
        if self.ast.module_name().is_some() {
            return Err(ParseError::DuplicateModule { span: kw.span });
        }
        if seen_definition {
            return Err(ParseError::MisplacedModule { span: kw.span });
        }

        let name_token = self.expect(TokenKind::Identifier, "module name")?;
        let name = self.lexeme_string(name_token.span);
        self.expect(TokenKind::Semicolon, "`;`")?;
        self.ast.set_module_name(name);
        Ok(())
    }

    /// Parse `def <name> (:|=) <expression> ;` under `parent`.
    ///
    /// `:` binds a constant, `=` a variable; the node's single child is the
    /// RHS expression.
    pub(crate) fn parse_definition(&mut self, parent: NodeId) -> Result<NodeId, ParseError> {
        let def = self.expect(TokenKind::KwDef, "`def`")?;
        let name_token = self.expect(TokenKind::Identifier, "identifier")?;
        let name = self.lexeme_string(name_token.span);

        let kind = match self.current().map(|t| t.kind) {
            Some(TokenKind::AssignConstant) => NodeKind::DefConstant { name },
            Some(TokenKind::AssignVariable) => NodeKind::DefVariable { name },
            _ => return Err(self.unexpected("`:` or `=`")),
        };
        self.advance();

        let node = self
            .ast
            .alloc(kind, parent, def.span.to(name_token.span));
        self.parse_expression(node)?;
        self.expect(TokenKind::Semicolon, "`;`")?;
        Ok(node)
    }

    // ------------------------------------------------------------------
    // Token cursor helpers
    // ------------------------------------------------------------------

    /// The current token, if any remain.
    pub(crate) fn current(&self) -> Option<Token> {
        self.tokens.get(self.position).copied()
    }

    /// Consume and return the current token.
    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.current();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Returns true if the current token has the given kind.
    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|t| t.kind == kind)
    }

    /// Consume a token of the given kind or fail with `expected <what>`.
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, ParseError> {
        match self.current() {
            Some(token) if token.kind == kind => {
                self.position += 1;
                Ok(token)
            }
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: what.into(),
                found: token.kind.describe().into(),
                span: token.span,
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: what.into(),
                span: self.previous_span(),
            }),
        }
    }

    /// Build the error for an illegal token at the current position.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        match self.current() {
            Some(token) => ParseError::UnexpectedToken {
                expected: expected.into(),
                found: token.kind.describe().into(),
                span: token.span,
            },
            None => ParseError::UnexpectedEof {
                expected: expected.into(),
                span: self.previous_span(),
            },
        }
    }

    /// Span substituted for errors when the stream is exhausted: the last
    /// consumed token's span, or the start of the file.
    pub(crate) fn previous_span(&self) -> Span {
        self.position
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span)
            .unwrap_or(Span::new(0, 0))
    }

    /// Copy a lexeme out of the source.
    pub(crate) fn lexeme_string(&self, span: Span) -> String {
        self.source.lexeme(span).into_owned()
    }
}
