use lexer::token::Token;
use shared_context::Span;

use crate::ast::{Expression, ExpressionKind, UnaryOp};
use crate::parser::{ParseErr, Parser};

impl<'src, 'ctx> Parser<'src, 'ctx> {
    pub(crate) fn parse_factor(&mut self) -> Result<Expression, ParseErr> {
        let tok = self.peek()?;

        match tok.get_token() {
            Token::ConstantInt => self.parse_integer_literal(),
            Token::True | Token::False => self.parse_boolean_literal(),
            t if t.is_unary() => self.parse_unary_expression(),
            Token::LeftParenthesis => self.parse_parenthesized_expression(),
            Token::Return | Token::Read | Token::Write => self.parse_call_expression(None),
            Token::Identifier => self.parse_identifier_led_factor(),
            _ => Err(ParseErr::new(
                "invalid expression".to_string(),
                &tok,
                &self.ctx.source_map,
            )),
        }
    }

    fn parse_integer_literal(&mut self) -> Result<Expression, ParseErr> {
        let (start, line) = self.peek()?.get_span().get_start_and_line();
        let tok = self.advance()?;
        let value: i64 = tok.get_lexeme().parse().map_err(|_| {
            ParseErr::new(
                "integer constant out of range".to_string(),
                &tok,
                &self.ctx.source_map,
            )
        })?;
        let span = Span::new(start, self.current_span_end(), line);
        Ok(Expression::new(ExpressionKind::Integer(value), span))
    }

    fn parse_boolean_literal(&mut self) -> Result<Expression, ParseErr> {
        let (start, line) = self.peek()?.get_span().get_start_and_line();
        let tok = self.advance()?;
        let value = tok.get_token() == Token::True;
        let span = Span::new(start, self.current_span_end(), line);
        Ok(Expression::new(ExpressionKind::Boolean(value), span))
    }

    fn parse_unary_expression(&mut self) -> Result<Expression, ParseErr> {
        let (start, line) = self.peek()?.get_span().get_start_and_line();
        let tok = self.advance()?;
        let op = match tok.get_token() {
            Token::Sub => UnaryOp::Neg,
            Token::Not => UnaryOp::Not,
            Token::LogNot => UnaryOp::LogNot,
            _ => {
                return Err(ParseErr::expected(
                    "a unary operator",
                    &tok,
                    &self.ctx.source_map,
                ))
            }
        };
        let operand = Box::new(self.parse_factor()?);
        let span = Span::new(start, self.current_span_end(), line);
        Ok(Expression::new(ExpressionKind::UnOp { op, operand }, span))
    }

    fn parse_parenthesized_expression(&mut self) -> Result<Expression, ParseErr> {
        self.advance()?; // consume '('
        let inner = self.parse_expression(0)?;
        self.expect_token(Token::RightParenthesis)?;
        Ok(inner)
    }

    /// An identifier at expression position is either a plain variable
    /// reference or the start of a call expression.
    fn parse_identifier_led_factor(&mut self) -> Result<Expression, ParseErr> {
        if self.peek2()?.get_token() == Token::LeftParenthesis {
            let name = self.parse_identifier()?.get_identifier();
            self.parse_call_expression(Some(name))
        } else {
            let (start, line) = self.peek()?.get_span().get_start_and_line();
            let name = self.parse_identifier()?.get_identifier();
            let span = Span::new(start, self.current_span_end(), line);
            Ok(Expression::new(ExpressionKind::Identifier(name), span))
        }
    }

    fn parse_call_expression(
        &mut self,
        name: Option<shared_context::Identifier>,
    ) -> Result<Expression, ParseErr> {
        let (start, line) = self.peek()?.get_span().get_start_and_line();
        let call = self.parse_call_args(name)?;
        let span = Span::new(start, self.current_span_end(), line);
        Ok(Expression::new(ExpressionKind::CallExpr(call), span))
    }
}
