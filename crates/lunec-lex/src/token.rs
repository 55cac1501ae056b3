//! Token definitions.
//!
//! A [`Token`] is a kind plus the span of source bytes that produced it. The
//! lexeme text is never copied out of the source buffer.

use std::fmt;

use lunec_util::{SourceFile, Span};

/// The closed set of token kinds in the lune language
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A name: letters, digits, underscores, not starting with a digit
    Identifier,

    /// A run of decimal digits
    ///
    /// The lexer does not convert the digits; conversion happens in the
    /// parser so overflow can be reported with the literal's span.
    IntegerLiteral,

    /// "def" - definition keyword
    KwDef,

    /// "fn" - function keyword
    KwFn,

    /// "module" - module declaration keyword
    KwModule,

    /// "("
    LParen,

    /// ")"
    RParen,

    /// "{"
    LBrace,

    /// "}"
    RBrace,

    /// ";"
    Semicolon,

    /// ","
    Comma,

    /// ":" - constant definition
    AssignConstant,

    /// "=" - variable definition, also the infix assignment operator
    AssignVariable,

    /// "=>" - introduces a function body
    AssignBody,

    /// "+"
    Plus,

    /// "-"
    Minus,

    /// "*"
    Star,

    /// "/"
    Slash,

    /// "^"
    Caret,
}

impl TokenKind {
    /// Human-readable form used in parser error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::KwDef => "`def`",
            TokenKind::KwFn => "`fn`",
            TokenKind::KwModule => "`module`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::AssignConstant => "`:`",
            TokenKind::AssignVariable => "`=`",
            TokenKind::AssignBody => "`=>`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Caret => "`^`",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "Identifier",
            TokenKind::IntegerLiteral => "IntegerLiteral",
            TokenKind::KwDef => "KwDef",
            TokenKind::KwFn => "KwFn",
            TokenKind::KwModule => "KwModule",
            TokenKind::LParen => "LParen",
            TokenKind::RParen => "RParen",
            TokenKind::LBrace => "LBrace",
            TokenKind::RBrace => "RBrace",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::Comma => "Comma",
            TokenKind::AssignConstant => "AssignConstant",
            TokenKind::AssignVariable => "AssignVariable",
            TokenKind::AssignBody => "AssignBody",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Star => "Star",
            TokenKind::Slash => "Slash",
            TokenKind::Caret => "Caret",
        };
        f.write_str(name)
    }
}

/// Map an identifier lexeme to its keyword kind, if it is one.
pub fn keyword_from_ident(lexeme: &[u8]) -> Option<TokenKind> {
    match lexeme {
        b"def" => Some(TokenKind::KwDef),
        b"fn" => Some(TokenKind::KwFn),
        b"module" => Some(TokenKind::KwModule),
        _ => None,
    }
}

/// A lexical unit: a kind and the source span it came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    /// What the token is
    pub kind: TokenKind,
    /// Where it came from
    pub span: Span,
}

impl Token {
    /// Create a new token
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Render a token stream in the textual dump format:
///
/// ```text
/// token[0] = { KwDef, "def" } 1:1
/// ```
///
/// One line per token, with the 1-based line/column of the token's first
/// byte. Used by the driver's `--emit-tokens` flag and by tests.
pub fn render_tokens(source: &SourceFile, tokens: &[Token]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        let (line, col) = source.offset_to_line_col(token.span.start);
        out.push_str(&format!(
            "token[{}] = {{ {}, \"{}\" }} {}:{}\n",
            i,
            token.kind,
            source.lexeme(token.span),
            line,
            col
        ));
    }
    out
}
