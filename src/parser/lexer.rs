//! Lexer for grid-map header lines using logos

use logos::Logos;

use crate::error::Span;

/// Literal token that stands in for a key coordinate in template maps
pub const PLACEHOLDER: &str = "$key$";

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")]
pub enum Token {
    #[token("$key$")]
    Placeholder,

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<usize>().ok(), priority = 3)]
    Int(usize),

    #[regex(r"[^ \t\r\n]+", |lex| lex.slice().to_string(), priority = 1)]
    Word(String),
}

/// Lex one header line into tokens with spans relative to the line.
///
/// `Int` drops the original digits (`007` lexes as 7), so callers that need
/// the source text slice the line by span.
///
/// Integers too large for `usize` come back as words so the parser can
/// report them with their original text.
pub fn lex(line: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    let mut lexer = Token::lexer(line);
    std::iter::from_fn(move || {
        let tok = lexer.next()?;
        let span = lexer.span();
        let tok = tok.unwrap_or_else(|_| Token::Word(lexer.slice().to_string()));
        Some((tok, span))
    })
}
