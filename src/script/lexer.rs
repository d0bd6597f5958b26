//! Lexer for gesture scripts using logos

use logos::Logos;

use super::ast::Span;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Gesture keywords
    #[token("press")]
    Press,
    #[token("move")]
    Move,
    #[token("release")]
    Release,
    #[token("toggle")]
    Toggle,
    #[token("drag")]
    Drag,
    #[token("hide")]
    Hide,
    #[token("show")]
    Show,

    // Modifiers
    #[token("at")]
    At,
    #[token("by")]
    By,
    #[token("steps")]
    Steps,
    #[token("primary")]
    Primary,
    #[token("secondary")]
    Secondary,

    #[token(",")]
    Comma,
    #[token("-")]
    Minus,

    // Literals - identifiers must come after keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    String(String),
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    /// Text no other rule matches; never valid in a script
    Error,
}

/// Lex input string into tokens with spans
///
/// Unrecognised text becomes [`Token::Error`] so the parser reports it
/// where it occurs.
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Error), span))
}
