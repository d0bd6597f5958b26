//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ScriptError;
use crate::interaction::PointerButton;
use crate::layout::{Point, Vector};
use crate::script::ast::*;
use crate::script::lexer::{lex, Token};

/// Parse a gesture script
pub fn parse(input: &str) -> Result<Script, Vec<ScriptError>> {
    let len = input.len();

    let token_iter = lex(input).map(|(tok, span)| (tok, span.into()));

    // Split (Token, SimpleSpan) into token and span parts
    let token_stream = Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    script_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn script_parser<'a, I>() -> impl Parser<'a, I, Script, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let sort_name = select! {
        Token::Ident(s) => s,
        Token::String(s) => s,
    }
    .labelled("sort name")
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    let number = just(Token::Minus)
        .or_not()
        .then(select! { Token::Number(n) => n })
        .map(|(minus, n)| if minus.is_some() { -n } else { n })
        .labelled("number");

    let pair = number
        .clone()
        .then_ignore(just(Token::Comma))
        .then(number);
    let point = pair.clone().map(|(x, y)| Point::new(x, y));

    let button = choice((
        just(Token::Primary).to(PointerButton::Primary),
        just(Token::Secondary).to(PointerButton::Secondary),
    ))
    .or_not()
    .map(Option::unwrap_or_default);

    let press = just(Token::Press)
        .ignore_then(sort_name.clone())
        .then_ignore(just(Token::At))
        .then(point.clone())
        .then(button.clone())
        .map(|((sort, at), button)| Gesture::Press { sort, at, button });

    let motion = just(Token::Move)
        .ignore_then(point.clone())
        .map(|to| Gesture::Move { to });

    let release = just(Token::Release)
        .ignore_then(point)
        .then(button)
        .map(|(at, button)| Gesture::Release { at, button });

    let toggle = just(Token::Toggle)
        .ignore_then(sort_name.clone())
        .map(|sort| Gesture::Toggle { sort });

    let hide = just(Token::Hide)
        .ignore_then(sort_name.clone())
        .map(|sort| Gesture::Hide { sort });

    let show = just(Token::Show)
        .ignore_then(sort_name.clone())
        .map(|sort| Gesture::Show { sort });

    let steps = just(Token::Steps).ignore_then(select! { Token::Number(n) => n });

    let drag = just(Token::Drag)
        .ignore_then(sort_name)
        .then_ignore(just(Token::By))
        .then(pair.map(|(dx, dy)| Vector::new(dx, dy)))
        .then(steps.or_not())
        .try_map(|((sort, by), steps), span| {
            let steps = match steps {
                None => 1,
                Some(n) if n >= 1.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => n as u32,
                Some(n) => {
                    return Err(Rich::custom(
                        span,
                        format!("step count must be a positive whole number, got {}", n),
                    ))
                }
            };
            Ok(Gesture::Drag { sort, by, steps })
        });

    choice((press, motion, release, toggle, hide, show, drag))
        .map_with(|gesture, e| Spanned::new(gesture, span_range(&e.span())))
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(|gestures| Script { gestures })
}
