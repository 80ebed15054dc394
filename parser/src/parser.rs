pub mod parse_err;
mod parse_expressions;
mod parse_statement;

pub use parse_err::ParseErr;

use std::collections::VecDeque;

use lexer::token::Token;
use lexer::{Lexer, SpannedToken};
use shared_context::symbol_table::Type;
use shared_context::{CompilerContext, Identifier, Span, SpannedIdentifier};

use crate::ast::{Function, Parameter, Program, Statement, StatementKind};

pub struct Parser<'src, 'ctx> {
    lexer: Lexer<'src>,
    pub(crate) ctx: &'ctx mut CompilerContext<'src>,
    current_token: Option<SpannedToken<'src>>,
    lookahead: VecDeque<SpannedToken<'src>>,
}

impl<'src, 'ctx> Parser<'src, 'ctx> {
    pub fn new(lexer: Lexer<'src>, ctx: &'ctx mut CompilerContext<'src>) -> Result<Self, ParseErr> {
        Ok(Self {
            lexer,
            ctx,
            current_token: None,
            lookahead: VecDeque::new(),
        })
    }

    /// Pulls the next significant token from the lexer, translating a
    /// `LexError` into a `ParseErr` so the rest of the parser only ever
    /// has to deal with one error type.
    fn scan(&mut self) -> Result<Option<SpannedToken<'src>>, ParseErr> {
        match self.lexer.next() {
            Some(Ok(tok)) => Ok(Some(tok)),
            Some(Err(err)) => Err(ParseErr::from_lex_error(err, &self.ctx.source_map)),
            None => Ok(None),
        }
    }

    /// Ensures the lookahead buffer holds at least `n + 1` tokens (or runs
    /// out of input trying).
    fn fill_to(&mut self, n: usize) -> Result<(), ParseErr> {
        while self.lookahead.len() <= n {
            match self.scan()? {
                Some(tok) => self.lookahead.push_back(tok),
                None => break,
            }
        }
        Ok(())
    }

    /// True once the token stream is exhausted. Does not consume.
    pub(crate) fn at_eof(&mut self) -> Result<bool, ParseErr> {
        self.fill_to(0)?;
        Ok(self.lookahead.is_empty())
    }

    /// Looks at the next token without consuming it. Errors if the input
    /// ends where a token was expected.
    pub(crate) fn peek(&mut self) -> Result<SpannedToken<'src>, ParseErr> {
        self.fill_to(0)?;
        self.lookahead
            .front()
            .copied()
            .ok_or_else(|| ParseErr::unexpected_eof(&self.ctx.source_map))
    }

    /// Looks one token past `peek` without consuming either.
    pub(crate) fn peek2(&mut self) -> Result<SpannedToken<'src>, ParseErr> {
        self.fill_to(1)?;
        self.lookahead
            .get(1)
            .copied()
            .ok_or_else(|| ParseErr::unexpected_eof(&self.ctx.source_map))
    }

    /// Consumes and returns the next token.
    pub(crate) fn advance(&mut self) -> Result<SpannedToken<'src>, ParseErr> {
        self.fill_to(0)?;
        let tok = self
            .lookahead
            .pop_front()
            .ok_or_else(|| ParseErr::unexpected_eof(&self.ctx.source_map))?;
        self.current_token = Some(tok);
        Ok(tok)
    }

    /// Consumes the next token, verifying it matches `expected`.
    pub(crate) fn expect_token(&mut self, expected: Token) -> Result<SpannedToken<'src>, ParseErr> {
        let tok = self.advance()?;
        if tok.get_token() == expected {
            Ok(tok)
        } else {
            Err(ParseErr::expected(expected, &tok, &self.ctx.source_map))
        }
    }

    /// End offset of the most recently consumed token, used to close out
    /// a node's span.
    pub(crate) fn current_span_end(&self) -> usize {
        self.current_token.map(|t| t.get_span().end).unwrap_or(0)
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseErr> {
        let mut functions = Vec::new();
        while !self.at_eof()? {
            functions.push(self.parse_function()?);
        }
        log::debug!("parsed {} top-level function(s)", functions.len());
        Ok(Program { functions })
    }

    fn parse_function(&mut self) -> Result<Function, ParseErr> {
        let (start, line) = self.peek()?.get_span().get_start_and_line();

        let return_type = self.parse_type()?;
        let name = self.parse_identifier()?;

        self.expect_token(Token::LeftParenthesis)?;
        let params = self.parse_params_list()?;
        self.expect_token(Token::RightParenthesis)?;

        let body = self.parse_block_statement()?;

        let span = Span::new(start, self.current_span_end(), line);
        let name = name.get_identifier();
        log::trace!(
            "parsed function `{}` with {} parameter(s)",
            self.ctx.interner.lookup(name.get_symbol()),
            params.len()
        );
        Ok(Function {
            return_type,
            name,
            params,
            body,
            span,
        })
    }

    fn parse_params_list(&mut self) -> Result<Vec<Parameter>, ParseErr> {
        let mut params = Vec::new();

        if self.peek()?.get_token() == Token::Void {
            self.advance()?;
            return Ok(params);
        }
        if self.peek()?.get_token() == Token::RightParenthesis {
            return Ok(params);
        }

        params.push(self.parse_parameter()?);
        while self.peek()?.get_token() != Token::RightParenthesis {
            self.expect_token(Token::Comma)?;
            params.push(self.parse_parameter()?);
        }
        Ok(params)
    }

    fn parse_parameter(&mut self) -> Result<Parameter, ParseErr> {
        let (start, line) = self.peek()?.get_span().get_start_and_line();
        let ty = self.parse_type()?;
        let name = self.parse_identifier()?;
        let span = Span::new(start, self.current_span_end(), line);
        Ok(Parameter {
            ty,
            name: name.get_identifier(),
            span,
        })
    }

    /// Parses one of `int` / `bool` / `void`.
    pub(crate) fn parse_type(&mut self) -> Result<Type, ParseErr> {
        let tok = self.advance()?;
        match tok.get_token() {
            Token::Int => Ok(Type::Int),
            Token::Bool => Ok(Type::Bool),
            Token::Void => Ok(Type::Void),
            _ => Err(ParseErr::expected("a type", &tok, &self.ctx.source_map)),
        }
    }

    pub(crate) fn parse_identifier(&mut self) -> Result<SpannedIdentifier, ParseErr> {
        let (start, line) = self.peek()?.get_span().get_start_and_line();
        let tok = self.advance()?;
        let span = Span::new(start, self.current_span_end(), line);

        if tok.get_token() == Token::Identifier {
            let identifier = Identifier::new(self.ctx.interner.intern(tok.get_lexeme()), 0);
            Ok(SpannedIdentifier::new(identifier, span))
        } else {
            Err(ParseErr::expected("identifier", &tok, &self.ctx.source_map))
        }
    }

    pub(crate) fn parse_block_statement(&mut self) -> Result<Statement, ParseErr> {
        let (start, line) = self.peek()?.get_span().get_start_and_line();
        self.expect_token(Token::LeftCurlyBracket)?;

        let mut statements = Vec::new();
        while self.peek()?.get_token() != Token::RightCurlyBracket {
            statements.push(self.parse_statement()?);
        }
        self.expect_token(Token::RightCurlyBracket)?;

        let span = Span::new(start, self.current_span_end(), line);
        Ok(Statement::new(StatementKind::Block(statements), span))
    }
}
