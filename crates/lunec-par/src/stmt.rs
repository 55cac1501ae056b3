//! Statement, block, and function parsing.

use lunec_lex::TokenKind;

use crate::ast::{NodeId, NodeKind};
use crate::error::ParseError;
use crate::Parser;

impl<'a> Parser<'a> {
    /// Parse one statement and attach it under `parent`.
    ///
    /// A statement is a definition, a block, or a bare expression ended by
    /// `;`.
    pub(crate) fn parse_statement(&mut self, parent: NodeId) -> Result<NodeId, ParseError> {
        match self.current().map(|t| t.kind) {
            Some(TokenKind::KwDef) => self.parse_definition(parent),
            Some(TokenKind::LBrace) => self.parse_block(parent),
            Some(_) => {
                let expr = self.parse_expression(parent)?;
                self.expect(TokenKind::Semicolon, "`;`")?;
                Ok(expr)
            }
            None => Err(self.unexpected("statement")),
        }
    }

    /// Parse `{ <statements> }`; children keep the statement order.
    pub(crate) fn parse_block(&mut self, parent: NodeId) -> Result<NodeId, ParseError> {
        let open = self.expect(TokenKind::LBrace, "`{`")?;
        let block = self.ast.alloc(NodeKind::Block, parent, open.span);

        while !self.at(TokenKind::RBrace) {
            if self.current().is_none() {
                return Err(ParseError::UnexpectedEof {
                    expected: "`}`".into(),
                    span: self.previous_span(),
                });
            }
            self.parse_statement(block)?;
        }

        let close = self.expect(TokenKind::RBrace, "`}`")?;
        self.ast.node_mut(block).span = open.span.to(close.span);
        Ok(block)
    }

    /// Parse `fn ( <params> ) <return-type?> => <statement>`.
    ///
    /// Functions are expression primaries; the node's children are the
    /// parameters followed by the single body statement.
    pub(crate) fn parse_function(&mut self, parent: NodeId) -> Result<NodeId, ParseError> {
        let kw = self.expect(TokenKind::KwFn, "`fn`")?;
        let function = self
            .ast
            .alloc(NodeKind::Function { return_type: None }, parent, kw.span);

        self.expect(TokenKind::LParen, "`(`")?;
        if !self.at(TokenKind::RParen) {
            loop {
                self.parse_parameter(function)?;
                if self.at(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "`)`")?;

        if self.at(TokenKind::Identifier) {
            let ret = self.expect(TokenKind::Identifier, "return type")?;
            let name = self.lexeme_string(ret.span);
            if let NodeKind::Function { return_type } = &mut self.ast.node_mut(function).kind {
                *return_type = Some(name);
            }
        }

        self.expect(TokenKind::AssignBody, "`=>`")?;
        let body = self.parse_statement(function)?;

        let covering = kw.span.to(self.ast.node(body).span);
        self.ast.node_mut(function).span = covering;
        Ok(function)
    }

    /// Parse one `name = type` parameter entry.
    ///
    /// A parameter is stored as a variable definition whose expression is
    /// the type identifier. A bare name with no `= type` part is fatal,
    /// reported at the name's own span.
    fn parse_parameter(&mut self, function: NodeId) -> Result<(), ParseError> {
        let name_token = self.expect(TokenKind::Identifier, "parameter name")?;
        let name = self.lexeme_string(name_token.span);

        if !self.at(TokenKind::AssignVariable) {
            return Err(ParseError::ParameterWithoutType {
                name,
                span: name_token.span,
            });
        }
        self.advance();

        let type_token = self.expect(TokenKind::Identifier, "parameter type")?;
        let param = self.ast.alloc(
            NodeKind::DefVariable { name },
            function,
            name_token.span.to(type_token.span),
        );
        let expr = self
            .ast
            .alloc(NodeKind::Expression, param, type_token.span);
        let type_name = self.lexeme_string(type_token.span);
        self.ast
            .alloc(NodeKind::Identifier { name: type_name }, expr, type_token.span);
        Ok(())
    }
}
