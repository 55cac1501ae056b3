//! Expression parsing by iterative re-rooting.
//!
//! Instead of the recursive `parse_expression(min_bp)` formulation of Pratt
//! parsing, expressions are built by in-place arena surgery. A primary is
//! attached under the current expression; each incoming infix operator then
//! climbs the parent chain from the most recent leaf to find its pivot and
//! splices itself between the pivot and the pivot's parent.
//!
//! The climb continues while the parent is an operation whose precedence is
//! strictly greater than the incoming operator's - or greater-or-equal when
//! the incoming operator is left-associative - and stops at the fence node
//! that owns the (sub)expression. The result is the standard shape:
//!
//! - `a + b * c`  →  `(+ a (* b c))`
//! - `a - b - c`  →  `(- (- a b) c)`
//! - `a ^ b ^ c`  →  `(^ a (^ b c))`
//!
//! Parenthesised groups are parsed against their own fence and their root
//! operation is raised to [`prec::VALUE`](crate::ast::prec::VALUE), so the
//! group behaves like a leaf ever after; the parentheses themselves produce
//! no nodes.

use lunec_lex::{Token, TokenKind};
use lunec_util::Span;

use crate::ast::{BinOp, NodeId, NodeKind};
use crate::error::ParseError;
use crate::Parser;

impl<'a> Parser<'a> {
    /// Parse one expression and attach its wrapper node under `parent`.
    ///
    /// The wrapper always ends up with exactly one child: a leaf or the
    /// root of an operator tree.
    pub(crate) fn parse_expression(&mut self, parent: NodeId) -> Result<NodeId, ParseError> {
        let start_span = self
            .current()
            .map(|t| t.span)
            .unwrap_or_else(|| self.previous_span());
        let expr = self.ast.alloc(NodeKind::Expression, parent, start_span);
        let root = self.parse_operator_tree(expr)?;
        let root_span = self.ast.node(root).span;
        self.ast.node_mut(expr).span = root_span;
        Ok(expr)
    }

    /// Parse a primary followed by any number of infix operators.
    ///
    /// Everything is attached under `fence`, which also bounds operator
    /// climbing: re-rooting never escapes the node whose child slot this
    /// call fills. Returns the root of the parsed subtree.
    fn parse_operator_tree(&mut self, fence: NodeId) -> Result<NodeId, ParseError> {
        let slot = self.ast.node(fence).children.len();
        let mut leaf = self.parse_primary(fence)?;

        while let Some((op, op_token)) = self.peek_operator() {
            self.advance();
            let pivot = self.find_pivot(leaf, fence, op);
            let operation = self.ast.splice_above(
                pivot,
                NodeKind::Operation {
                    op,
                    precedence: op.precedence(),
                },
                op_token.span,
            );
            leaf = self.parse_primary(operation)?;

            // Widen the operation over both operands, and every enclosing
            // operation whose right subtree just grew.
            let covering = self.ast.node(pivot).span.to(self.ast.node(leaf).span);
            self.ast.node_mut(operation).span = covering;
            let mut ancestor = self.ast.node(operation).parent;
            while let Some(id) = ancestor {
                if id == fence {
                    break;
                }
                let widened = self.ast.node(id).span.to(covering);
                self.ast.node_mut(id).span = widened;
                ancestor = self.ast.node(id).parent;
            }
        }

        Ok(self.ast.node(fence).children[slot])
    }

    /// Walk up from `leaf` to the node the incoming operator re-roots at.
    ///
    /// Climbs while the parent is an operation that binds at least as
    /// tightly as `op` (strictly tighter for right-associative `op`), and
    /// never past `fence`.
    fn find_pivot(&self, leaf: NodeId, fence: NodeId, op: BinOp) -> NodeId {
        let mut pivot = leaf;
        loop {
            let parent = match self.ast.node(pivot).parent {
                Some(parent) if parent != fence => parent,
                _ => break,
            };
            let parent_precedence = match self.ast.node(parent).kind {
                NodeKind::Operation { precedence, .. } => precedence,
                _ => break,
            };
            let climbs = parent_precedence > op.precedence()
                || (parent_precedence == op.precedence() && !op.is_right_associative());
            if !climbs {
                break;
            }
            pivot = parent;
        }
        pivot
    }

    /// Classify the current token as an infix operator, without consuming.
    fn peek_operator(&self) -> Option<(BinOp, Token)> {
        let token = self.current()?;
        let op = match token.kind {
            TokenKind::AssignVariable => BinOp::Assign,
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            TokenKind::Caret => BinOp::Pow,
            _ => return None,
        };
        Some((op, token))
    }

    /// Parse a primary: literal, identifier, function, or parenthesised
    /// group. The result is attached as the next child of `parent`.
    fn parse_primary(&mut self, parent: NodeId) -> Result<NodeId, ParseError> {
        let token = match self.current() {
            Some(token) => token,
            None => {
                return Err(ParseError::UnexpectedEof {
                    expected: "expression".into(),
                    span: self.previous_span(),
                })
            }
        };

        match token.kind {
            TokenKind::IntegerLiteral => {
                self.advance();
                let value = self.convert_integer(token.span)?;
                Ok(self
                    .ast
                    .alloc(NodeKind::IntegerLiteral { value }, parent, token.span))
            }
            TokenKind::Identifier => {
                self.advance();
                let name = self.lexeme_string(token.span);
                Ok(self
                    .ast
                    .alloc(NodeKind::Identifier { name }, parent, token.span))
            }
            TokenKind::KwFn => self.parse_function(parent),
            TokenKind::LParen => {
                self.advance();
                let root = self.parse_operator_tree(parent)?;
                self.expect(TokenKind::RParen, "`)`")?;
                self.ast.mark_group(root);
                Ok(root)
            }
            _ => Err(ParseError::UnexpectedToken {
                expected: "expression".into(),
                found: token.kind.describe().into(),
                span: token.span,
            }),
        }
    }

    /// Convert a literal's digit span to a signed 64-bit value.
    ///
    /// Base-10 accumulation with overflow checking on every step; failure
    /// points at the whole literal.
    fn convert_integer(&self, span: Span) -> Result<i64, ParseError> {
        let mut value: i64 = 0;
        for &byte in self.source.slice(span) {
            let digit = i64::from(byte - b'0');
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or(ParseError::IntegerOverflow { span })?;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ast;
    use lunec_lex::Lexer;
    use lunec_util::SourceFile;

    fn parse(source: &str) -> Result<Ast, ParseError> {
        let source = SourceFile::from_str("expr.ln", source);
        let tokens = Lexer::new(&source).tokenize().expect("lexes cleanly");
        let ast = Parser::parse(&source, &tokens)?;
        ast.validate().expect("parsed tree passes validation");
        Ok(ast)
    }

    fn dump(source: &str) -> String {
        parse(source).unwrap().to_string()
    }

    #[test]
    fn test_single_literal() {
        assert_eq!(dump("def x = 42;"), "Var x = 42");
    }

    #[test]
    fn test_single_identifier() {
        assert_eq!(dump("def x = y;"), "Var x = y");
    }

    #[test]
    fn test_addition() {
        assert_eq!(dump("def x = 1 + 2;"), "Var x = (+ 1 2)");
    }

    #[test]
    fn test_precedence_mul_over_add() {
        assert_eq!(dump("def x = 1 + 2 * 3;"), "Var x = (+ 1 (* 2 3))");
    }

    #[test]
    fn test_precedence_mul_then_add() {
        assert_eq!(dump("def x = 1 * 2 + 3;"), "Var x = (+ (* 1 2) 3)");
    }

    #[test]
    fn test_left_associative_subtraction() {
        assert_eq!(dump("def x = 10 - 4 - 3;"), "Var x = (- (- 10 4) 3)");
    }

    #[test]
    fn test_left_associative_division() {
        assert_eq!(dump("def x = 100 / 5 / 2;"), "Var x = (/ (/ 100 5) 2)");
    }

    #[test]
    fn test_right_associative_power() {
        assert_eq!(dump("def x = 2 ^ 3 ^ 2;"), "Var x = (^ 2 (^ 3 2))");
    }

    #[test]
    fn test_power_binds_tighter_than_mul() {
        assert_eq!(dump("def x = 2 * 3 ^ 2;"), "Var x = (* 2 (^ 3 2))");
        assert_eq!(dump("def x = 2 ^ 3 * 2;"), "Var x = (* (^ 2 3) 2)");
    }

    #[test]
    fn test_mixed_levels() {
        assert_eq!(
            dump("def x = 1 + 2 * 3 ^ 4 - 5;"),
            "Var x = (- (+ 1 (* 2 (^ 3 4))) 5)"
        );
    }

    #[test]
    fn test_parentheses_override() {
        assert_eq!(dump("def x = (1 + 2) * 3;"), "Var x = (* (+ 1 2) 3)");
    }

    #[test]
    fn test_parentheses_on_right() {
        assert_eq!(dump("def x = 1 * (2 + 3);"), "Var x = (* 1 (+ 2 3))");
    }

    #[test]
    fn test_parenthesised_group_is_a_barrier() {
        // The group must stay intact when lower-precedence operators follow.
        assert_eq!(
            dump("def x = 1 + (2 + 3) + 4;"),
            "Var x = (+ (+ 1 (+ 2 3)) 4)"
        );
        assert_eq!(
            dump("def x = 1 ^ (2 + 3) + 4;"),
            "Var x = (+ (^ 1 (+ 2 3)) 4)"
        );
    }

    #[test]
    fn test_nested_parentheses() {
        assert_eq!(dump("def x = ((1));"), "Var x = 1");
        assert_eq!(
            dump("def x = ((1 + 2) * (3 - 4)) / 5;"),
            "Var x = (/ (* (+ 1 2) (- 3 4)) 5)"
        );
    }

    #[test]
    fn test_redundant_parentheses_around_leaf() {
        assert_eq!(dump("def x = (1) + (y);"), "Var x = (+ 1 y)");
    }

    #[test]
    fn test_assignment_operator() {
        assert_eq!(dump("def x = a = 1;"), "Var x = (= a 1)");
        // Assignment binds loosest of all.
        assert_eq!(dump("def x = a = 1 + 2;"), "Var x = (= a (+ 1 2))");
    }

    #[test]
    fn test_identifiers_in_operations() {
        assert_eq!(dump("def x = a + b * c;"), "Var x = (+ a (* b c))");
    }

    #[test]
    fn test_integer_conversion_bounds() {
        // i64::MAX parses; one more digit overflows.
        assert_eq!(
            dump("def x = 9223372036854775807;"),
            "Var x = 9223372036854775807"
        );
        let err = parse("def x = 9223372036854775808;").unwrap_err();
        assert!(matches!(err, ParseError::IntegerOverflow { .. }));
    }

    #[test]
    fn test_integer_overflow_span() {
        let err = parse("def x = 99999999999999999999;").unwrap_err();
        assert_eq!(err.span(), Span::new(8, 20));
    }

    #[test]
    fn test_missing_right_operand() {
        let err = parse("def x = 1 + ;").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected: "expression".into(),
                found: "`;`".into(),
                span: Span::new(12, 1),
            }
        );
        assert!(err.to_string().contains("expression"));
    }

    #[test]
    fn test_missing_expression_entirely() {
        let err = parse("def x = ;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
        assert!(err.to_string().contains("expression"));
    }

    #[test]
    fn test_expression_at_end_of_file() {
        let err = parse("def x = 1 +").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
        assert!(err.to_string().contains("expression"));
    }

    #[test]
    fn test_unclosed_parenthesis() {
        let err = parse("def x = (1 + 2;").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected: "`)`".into(),
                found: "`;`".into(),
                span: Span::new(14, 1),
            }
        );
    }

    #[test]
    fn test_empty_parentheses_are_not_an_expression() {
        let err = parse("def x = ();").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
        assert!(err.to_string().contains("expression"));
    }

    #[test]
    fn test_no_unary_minus() {
        let err = parse("def x = -1;").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected: "expression".into(),
                found: "`-`".into(),
                span: Span::new(8, 1),
            }
        );
    }

    #[test]
    fn test_operation_spans_cover_operands() {
        let source = SourceFile::from_str("expr.ln", "def x = 1 + 2 * 3;");
        let tokens = Lexer::new(&source).tokenize().unwrap();
        let ast = Parser::parse(&source, &tokens).unwrap();

        // The expression wrapper covers the whole operator tree.
        let def = ast.node(Ast::ROOT).children[0];
        let expr = ast.node(def).children[0];
        assert_eq!(ast.node(expr).span, Span::new(8, 9));
        assert_eq!(source.lexeme(ast.node(expr).span), "1 + 2 * 3");
    }

    #[test]
    fn test_every_shape_validates() {
        // validate() runs inside parse(); this spot-checks a deep mix.
        let sources = [
            "def x = 1;",
            "def x = 1 + 2 - 3 * 4 / 5 ^ 6;",
            "def x = ((((1))));",
            "def x = (1 + 2) ^ (3 + 4) ^ 5;",
            "def x = a = b = c;",
            "def x = (a = 1) + 2;",
        ];
        for source in sources {
            parse(source).unwrap();
        }
    }
}
