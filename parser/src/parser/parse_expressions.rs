mod parse_factor;

use lexer::token::Token;
use shared_context::Span;

use crate::ast::{BinaryOp, Expression, ExpressionKind};
use crate::parser::{ParseErr, Parser};

impl<'src, 'ctx> Parser<'src, 'ctx> {
    /// Precedence-climbing expression parser. `min_prec` is the minimum
    /// binding power an operator must have to be consumed at this
    /// recursion level.
    pub(crate) fn parse_expression(&mut self, min_prec: usize) -> Result<Expression, ParseErr> {
        let (start, line) = self.peek()?.get_span().get_start_and_line();
        let mut left = self.parse_factor()?;

        loop {
            let next = self.peek()?.get_token();
            if !next.is_binary() || next.precedence() < min_prec {
                break;
            }
            left = self.handle_binary(left, next.precedence(), start, line)?;
        }

        Ok(left)
    }

    fn handle_binary(
        &mut self,
        left: Expression,
        token_prec: usize,
        start: usize,
        line: usize,
    ) -> Result<Expression, ParseErr> {
        let op = self.parse_binary_op()?;
        let right = self.parse_expression(token_prec + 1)?;
        let kind = ExpressionKind::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
        let span = Span::new(start, self.current_span_end(), line);
        Ok(Expression::new(kind, span))
    }

    fn parse_binary_op(&mut self) -> Result<BinaryOp, ParseErr> {
        let tok = self.advance()?;
        match tok.get_token() {
            Token::Add => Ok(BinaryOp::Add),
            Token::Sub => Ok(BinaryOp::Sub),
            Token::Mult => Ok(BinaryOp::Mult),
            Token::LogOr => Ok(BinaryOp::LogOr),
            Token::LogAnd => Ok(BinaryOp::LogAnd),
            Token::LogXor => Ok(BinaryOp::LogXor),
            Token::Or => Ok(BinaryOp::Or),
            Token::And => Ok(BinaryOp::And),
            Token::Xor => Ok(BinaryOp::Xor),
            Token::Eq => Ok(BinaryOp::Eq),
            Token::Gt => Ok(BinaryOp::Gt),
            Token::Geq => Ok(BinaryOp::Geq),
            Token::Lt => Ok(BinaryOp::Lt),
            Token::Leq => Ok(BinaryOp::Leq),
            _ => Err(ParseErr::expected(
                "a binary operator",
                &tok,
                &self.ctx.source_map,
            )),
        }
    }
}
