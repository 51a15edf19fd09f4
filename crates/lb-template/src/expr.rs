//! Arithmetic over decimal literals and `+ - * /`.
//!
//! Precedence is the usual one: `*` and `/` bind tighter than `+` and `-`,
//! and operators of equal precedence associate to the left. A leading unary
//! minus is accepted on any operand.
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary)*
//! unary   := '-' unary | NUMBER
//! ```

use std::fmt;
use std::ops::Range;

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;
use logos::Logos;

use crate::error::{TemplateError, TemplateResult};

type Span = SimpleSpan;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum Token {
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div => lhs / rhs,
        }
    }
}

fn lex(source: &str) -> TemplateResult<Vec<(Token, Range<usize>)>> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                return Err(TemplateError::expression(
                    source,
                    format!("unexpected '{}' at offset {}", &source[span.clone()], span.start),
                ));
            }
        }
    }
    Ok(tokens)
}

fn expr_parser<'a, I>() -> impl Parser<'a, I, f64, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = Span>,
{
    let number = select! { Token::Number(n) => n }.labelled("number");

    let unary = recursive(|unary| {
        just(Token::Minus)
            .ignore_then(unary)
            .map(|v: f64| -v)
            .or(number)
    });

    let product = unary.clone().foldl(
        choice((just(Token::Star).to(Op::Mul), just(Token::Slash).to(Op::Div)))
            .then(unary)
            .repeated(),
        |lhs, (op, rhs)| op.apply(lhs, rhs),
    );

    product
        .clone()
        .foldl(
            choice((just(Token::Plus).to(Op::Add), just(Token::Minus).to(Op::Sub)))
                .then(product)
                .repeated(),
            |lhs, (op, rhs)| op.apply(lhs, rhs),
        )
        .then_ignore(end())
}

/// Evaluate an arithmetic expression.
///
/// Fails when the text does not parse or the result is not finite (for
/// example a division by zero).
pub fn evaluate(source: &str) -> TemplateResult<f64> {
    let tokens = lex(source)?;
    let token_iter = tokens
        .into_iter()
        .map(|(tok, span)| (tok, Span::from(span)));
    let eoi: Span = (source.len()..source.len()).into();
    let stream = Stream::from_iter(token_iter).map(eoi, |(t, s): (_, _)| (t, s));

    let value = expr_parser()
        .parse(stream)
        .into_result()
        .map_err(|errors| {
            let reason = errors
                .first()
                .map_or_else(|| "invalid expression".to_string(), ToString::to_string);
            TemplateError::expression(source, reason)
        })?;

    if !value.is_finite() {
        return Err(TemplateError::expression(source, "result is not finite"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(s: &str) -> f64 {
        evaluate(s).unwrap()
    }

    #[test]
    fn literals() {
        assert_eq!(eval("42"), 42.0);
        assert_eq!(eval("2.5"), 2.5);
        assert_eq!(eval("-3"), -3.0);
    }

    #[test]
    fn multiplication_binds_tighter() {
        assert_eq!(eval("1+2*3"), 7.0);
        assert_eq!(eval("2*3+1"), 7.0);
        assert_eq!(eval("10-4/2"), 8.0);
    }

    #[test]
    fn left_associative() {
        assert_eq!(eval("8/2/2"), 2.0);
        assert_eq!(eval("10-3-2"), 5.0);
    }

    #[test]
    fn unary_minus() {
        assert_eq!(eval("-2*-3"), 6.0);
        assert_eq!(eval("5--1"), 6.0);
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(eval(" 1 + 2 "), 3.0);
    }

    #[test]
    fn division_by_zero_fails() {
        let err = evaluate("1/0").unwrap_err();
        assert!(matches!(err, TemplateError::ExpressionEvaluation { .. }));
    }

    #[test]
    fn malformed_fails() {
        assert!(evaluate("").is_err());
        assert!(evaluate("1+").is_err());
        assert!(evaluate("*2").is_err());
        assert!(evaluate("1 2").is_err());
        assert!(evaluate("1+x").is_err());
    }
}
