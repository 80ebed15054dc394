use lexer::token::Token;
use shared_context::{Identifier, Span};

use crate::ast::{Call, Statement, StatementKind};
use crate::parser::{ParseErr, Parser};

impl<'src, 'ctx> Parser<'src, 'ctx> {
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseErr> {
        let next = self.peek()?.get_token();
        if next == Token::LeftCurlyBracket {
            return self.parse_block_statement();
        }

        let (start, line) = self.peek()?.get_span().get_start_and_line();
        let kind = match next {
            Token::Int | Token::Bool | Token::Void => self.parse_variable_statement()?,
            Token::While => self.parse_while_statement()?,
            Token::If => self.parse_if_statement()?,
            Token::Return | Token::Read | Token::Write => {
                let call = self.parse_call_args(None)?;
                self.expect_token(Token::Semicolon)?;
                StatementKind::Call(call)
            }
            Token::Identifier => self.parse_identifier_led_statement()?,
            _ => {
                let tok = self.peek()?;
                return Err(ParseErr::expected("a statement", &tok, &self.ctx.source_map));
            }
        };

        let span = Span::new(start, self.current_span_end(), line);
        Ok(Statement::new(kind, span))
    }

    fn parse_variable_statement(&mut self) -> Result<StatementKind, ParseErr> {
        let ty = self.parse_type()?;
        let name = self.parse_identifier()?;
        self.expect_token(Token::Semicolon)?;
        Ok(StatementKind::Variable {
            ty,
            name: name.get_identifier(),
        })
    }

    fn parse_while_statement(&mut self) -> Result<StatementKind, ParseErr> {
        self.advance()?; // consume 'while'
        self.expect_token(Token::LeftParenthesis)?;
        let pred = self.parse_expression(0)?;
        self.expect_token(Token::RightParenthesis)?;
        let body = Box::new(self.parse_statement()?);
        Ok(StatementKind::While { pred, body })
    }

    fn parse_if_statement(&mut self) -> Result<StatementKind, ParseErr> {
        self.advance()?; // consume 'if'
        self.expect_token(Token::LeftParenthesis)?;
        let pred = self.parse_expression(0)?;
        self.expect_token(Token::RightParenthesis)?;
        let positive = Box::new(self.parse_statement()?);

        let negative = if self.peek()?.get_token() == Token::Else {
            self.advance()?; // consume 'else'
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(StatementKind::If {
            pred,
            positive,
            negative,
        })
    }

    /// An identifier at statement position is either an assignment
    /// (`name = expr;`) or a call statement (`name(args);`).
    fn parse_identifier_led_statement(&mut self) -> Result<StatementKind, ParseErr> {
        if self.peek2()?.get_token() == Token::LeftParenthesis {
            let name = self.parse_identifier()?.get_identifier();
            let call = self.parse_call_args(Some(name))?;
            self.expect_token(Token::Semicolon)?;
            Ok(StatementKind::Call(call))
        } else {
            let name = self.parse_identifier()?.get_identifier();
            self.expect_token(Token::Assignment)?;
            let expr = self.parse_expression(0)?;
            self.expect_token(Token::Semicolon)?;
            Ok(StatementKind::Assignment { name, expr })
        }
    }

    /// Parses the shared `name(args)` form, consuming the callee name
    /// (builtin keyword or ordinary identifier) if not already consumed
    /// by the caller, then the parenthesised, comma-separated argument
    /// list. Leaves any trailing `;` to the caller: statement position
    /// requires one, expression position does not.
    pub(crate) fn parse_call_args(&mut self, name: Option<Identifier>) -> Result<Call, ParseErr> {
        let name = match name {
            Some(name) => name,
            None => {
                let tok = self.advance()?;
                let symbol = self.ctx.interner.intern(tok.get_lexeme());
                Identifier::new(symbol, 0)
            }
        };

        self.expect_token(Token::LeftParenthesis)?;
        let mut args = Vec::new();
        if self.peek()?.get_token() != Token::RightParenthesis {
            args.push(self.parse_expression(0)?);
            while self.peek()?.get_token() == Token::Comma {
                self.advance()?;
                args.push(self.parse_expression(0)?);
            }
        }
        self.expect_token(Token::RightParenthesis)?;

        Ok(Call::new(name, args))
    }
}
