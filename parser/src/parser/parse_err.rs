use std::error::Error;
use std::fmt;

use lexer::{LexError, SpannedToken};
use shared_context::source_map::SourceMap;
use shared_context::Span;

#[derive(Debug)]
pub struct ParseErr {
    formated_error: String,
}

impl ParseErr {
    pub fn new(message: String, token: &SpannedToken, source_map: &SourceMap) -> Self {
        Self {
            formated_error: source_map.format_message(message, token.get_span()),
        }
    }

    pub fn expected(expected: impl ToString, found: &SpannedToken, source_map: &SourceMap) -> Self {
        ParseErr::new(
            format!(
                "expected {}, found `{}`",
                expected.to_string(),
                found.get_token()
            ),
            found,
            source_map,
        )
    }

    pub fn unexpected_eof(source_map: &SourceMap) -> Self {
        let end = source_map.get_source_code().len();
        let span = Span::new(end, end, source_map.get_source_code().lines().count().max(1));
        Self {
            formated_error: source_map.format_message("unexpected end of file".to_string(), span),
        }
    }

    pub fn from_lex_error(err: LexError, source_map: &SourceMap) -> Self {
        Self {
            formated_error: source_map.format_message(err.message, err.span),
        }
    }
}

impl fmt::Display for ParseErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formated_error)
    }
}

impl Error for ParseErr {}
