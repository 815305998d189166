//! Lexer for command templates using logos

use logos::Logos;

use super::ast::Span;

/// Template tokens. Nothing is skipped: every byte of the template belongs
/// to exactly one token, so spans tile the input.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token<'s> {
    /// `<name>` or `<name:type>`, carrying the text between the brackets
    #[regex(r"<[^<>]*>", |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    Placeholder(&'s str),

    /// A run of literal characters
    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'s str),

    /// A `<` that does not open a placeholder (e.g. `a < b` or `<<x>`)
    #[token("<")]
    Open,
}

impl<'s> Token<'s> {
    /// The literal text this token contributes when it is not a placeholder
    pub fn literal(&self) -> Option<&'s str> {
        match self {
            Token::Text(s) => Some(*s),
            Token::Open => Some("<"),
            Token::Placeholder(_) => None,
        }
    }
}

/// Lex template text into tokens with spans.
///
/// Input the token rules do not cover comes back as literal text, so no byte
/// of the template is ever dropped.
pub fn lex(input: &str) -> impl Iterator<Item = (Token<'_>, Span)> + '_ {
    Token::lexer(input).spanned().map(move |(tok, span)| match tok {
        Ok(tok) => (tok, span),
        Err(()) => (Token::Text(&input[span.clone()]), span),
    })
}
