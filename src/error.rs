//! Error types for gesture scripts

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::script::lexer::Token;
use crate::script::Span;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ScriptError {
    pub fn span(&self) -> Span {
        match self {
            ScriptError::Syntax { span, .. } => span.clone(),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            ScriptError::Syntax {
                span,
                message,
                expected,
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };
                report(
                    source,
                    filename,
                    span.clone(),
                    message,
                    &format!("{}{}", message, expected_str),
                )
            }
        }
    }
}

/// Render a single-label ariadne report into a string
pub(crate) fn report(source: &str, filename: &str, span: Span, message: &str, label: &str) -> String {
    let mut buf = Vec::new();
    let written = Report::build(ReportKind::Error, filename, span.start)
        .with_message(message)
        .with_label(
            Label::new((filename, span))
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish()
        .write((filename, Source::from(source)), &mut buf);
    match written {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => format!("{}: {}", filename, message),
    }
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for ScriptError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::{RichPattern, RichReason};

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of input".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                RichPattern::Token(tok) => Some(format_token(tok)),
                RichPattern::Label(label) => Some(label.to_string()),
                RichPattern::EndOfInput => Some("end of input".to_string()),
                RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                RichPattern::Any => Some("any token".to_string()),
                RichPattern::SomethingElse => None,
            })
            .collect();

        ScriptError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::String(s) => format!("string \"{}\"", s),
        Token::Number(n) => format!("number {}", n),
        Token::Comma => "','".to_string(),
        Token::Minus => "'-'".to_string(),
        Token::Press => "keyword 'press'".to_string(),
        Token::Move => "keyword 'move'".to_string(),
        Token::Release => "keyword 'release'".to_string(),
        Token::Toggle => "keyword 'toggle'".to_string(),
        Token::Drag => "keyword 'drag'".to_string(),
        Token::Hide => "keyword 'hide'".to_string(),
        Token::Show => "keyword 'show'".to_string(),
        Token::At => "keyword 'at'".to_string(),
        Token::By => "keyword 'by'".to_string(),
        Token::Steps => "keyword 'steps'".to_string(),
        Token::Primary => "keyword 'primary'".to_string(),
        Token::Secondary => "keyword 'secondary'".to_string(),
        Token::Error => "unrecognised text".to_string(),
        Token::LineComment => "comment".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::script::parse;

    #[test]
    fn test_unexpected_token_message() {
        let errors = parse("toggle 42").unwrap_err();
        let message = errors[0].to_string();
        assert!(message.contains("Unexpected number 42"), "{}", message);
    }

    #[test]
    fn test_format_points_at_source() {
        let source = "move 1 2";
        let errors = parse(source).unwrap_err();
        assert_eq!(errors[0].span(), 7..8);
        let rendered = errors[0].format(source, "gestures.txt");
        assert!(rendered.contains("gestures.txt"));
        assert!(rendered.contains("Unexpected number 2"));
    }
}
