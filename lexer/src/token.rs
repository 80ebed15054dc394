use logos::Logos;

mod token_impl;

/// Extras for logos to keep track of line number while scanning.
#[derive(Debug, Default)]
pub struct LinePosition {
    pub line_num: usize,
    pub col_num: usize,
}

/// Callback invoked whenever logos matches a newline. Always returns `None`
/// so the token itself is skipped.
fn update_line_num(lex: &mut logos::Lexer<Token>) {
    lex.extras.line_num += 1;
    lex.extras.col_num = 0;
}

#[derive(Debug, PartialEq, Eq, Logos, Clone, Copy)]
#[logos(extras = LinePosition)]
pub enum Token {
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", priority = 0)]
    Identifier,

    #[regex(r"\d+")]
    ConstantInt,

    //
    // Keywords
    //
    #[token("int")]
    Int,
    #[token("bool")]
    Bool,
    #[token("void")]
    Void,
    #[token("return")]
    Return,
    #[token("read")]
    Read,
    #[token("write")]
    Write,
    #[token("while")]
    While,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("true")]
    True,
    #[token("false")]
    False,

    //
    // Operators
    //
    #[token("=")]
    Assignment,

    #[token("+")]
    Add,
    #[token("*")]
    Mult,
    #[token("-")]
    Sub,
    #[token("~")]
    Not,

    #[token("||")]
    LogOr,
    #[token("&&")]
    LogAnd,
    #[token("^^")]
    LogXor,
    #[token("!")]
    LogNot,

    #[token("|")]
    Or,
    #[token("&")]
    And,
    #[token("^")]
    Xor,

    #[token("==")]
    Eq,
    #[token(">")]
    Gt,
    #[token(">=")]
    Geq,
    #[token("<")]
    Lt,
    #[token("<=")]
    Leq,

    //
    // Symbols
    //
    #[token("(")]
    LeftParenthesis,
    #[token(")")]
    RightParenthesis,
    #[token("{")]
    LeftCurlyBracket,
    #[token("}")]
    RightCurlyBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,

    // skipped patterns
    #[regex(r"\n", callback = update_line_num)]
    #[regex(r"[ \t\r\f]+")]
    #[regex(r"//[^\n]*")]
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    Skip,

    // invalid patterns
    #[regex(r"\d+[a-zA-Z_][a-zA-Z0-9_]*")]
    Error,
}
