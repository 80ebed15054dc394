//! Hand-rolled line-tracking driver around a `logos`-generated token
//! automaton. The lexer is treated as plumbing: it has no opinion on
//! language semantics, it only turns source text into a stream of
//! `SpannedToken`s (or a `LexError`) for the parser to consume.

pub mod token;

use logos::Logos;
use shared_context::Span;
use token::Token;

/// A token together with the exact source range it was scanned from.
#[derive(Debug, Clone, Copy)]
pub struct SpannedToken<'source> {
    pub token: Token,
    pub lexeme: &'source str,
    pub span: Span,
}

impl<'source> SpannedToken<'source> {
    pub fn get_token(&self) -> Token {
        self.token
    }

    pub fn get_lexeme(&self) -> &'source str {
        self.lexeme
    }

    pub fn get_span(&self) -> Span {
        self.span
    }

    pub fn get_line(&self) -> usize {
        self.span.line
    }
}

/// A single, unrecoverable lexical error: an unrecognised character
/// sequence. Lexing stops at the first one, matching the way a later
/// parse/semantic error aborts its own phase.
#[derive(Debug)]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

pub struct Lexer<'source> {
    iter: logos::Lexer<'source, Token>,
    input: &'source str,
    line: usize,
}

impl<'source> Lexer<'source> {
    pub fn new(input: &'source str) -> Self {
        Self {
            iter: Token::lexer(input),
            input,
            line: 1,
        }
    }

    pub fn get_source_code(&self) -> &'source str {
        self.input
    }

    /// Scans and returns the next significant token, skipping whitespace
    /// and comments. Returns `None` at end of input.
    pub fn next(&mut self) -> Option<Result<SpannedToken<'source>, LexError>> {
        loop {
            let raw = self.iter.next()?;
            let span = self.iter.span();
            let lexeme = self.iter.slice();

            let token = match raw {
                Ok(token) => token,
                Err(()) => {
                    return Some(Err(LexError {
                        message: format!("unrecognised token `{lexeme}`"),
                        span: Span::new(span.start, span.end, self.iter.extras.line_num + 1),
                    }));
                }
            };

            match token {
                Token::Skip => continue,
                Token::Error => {
                    return Some(Err(LexError {
                        message: format!("invalid token `{lexeme}`"),
                        span: Span::new(span.start, span.end, self.iter.extras.line_num + 1),
                    }));
                }
                _ => {
                    self.line = self.iter.extras.line_num + 1;
                    log::trace!("lexed {token} `{lexeme}` at line {}", self.line);
                    return Some(Ok(SpannedToken {
                        token,
                        lexeme,
                        span: Span::new(span.start, span.end, self.line),
                    }));
                }
            }
        }
    }
}
