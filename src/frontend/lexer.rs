use crate::backend::ir::BinaryOp;
use crate::common::span::{Span, Spanned};
use crate::common::token::Token;
use chumsky::prelude::*;

// Lexer
pub fn lexer<'src>()
-> impl Parser<'src, &'src str, Vec<Spanned<Token<'src>>>, extra::Err<Rich<'src, char, Span>>> {
    // A parser for numbers
    let num = text::int(10)
        .to_slice()
        .try_map(|digits: &str, span| {
            digits
                .parse::<i64>()
                .map(Token::Num)
                .map_err(|e| Rich::custom(span, format!("invalid integer literal: {}", e)))
        });

    // A parser for control characters
    let ctrl = one_of("=,:@[]+-").map(Token::Ctrl);

    // Newlines separate instructions
    let newline = just('\n').to(Token::Newline);

    // A parser for mnemonics, temporaries and label names
    let word = any()
        .filter(|c: &char| c.is_ascii_alphabetic() || *c == '_' || *c == '.')
        .then(
            any()
                .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
                .repeated(),
        )
        .to_slice()
        .map(|word: &str| match word {
            "add" => Token::Op(BinaryOp::Add),
            "sub" => Token::Op(BinaryOp::Sub),
            "mul" => Token::Op(BinaryOp::Mul),
            "div" => Token::Op(BinaryOp::Div),
            "eq" => Token::Op(BinaryOp::Eq),
            "gt" => Token::Op(BinaryOp::Gt),
            "lt" => Token::Op(BinaryOp::Lt),
            "load" => Token::Load,
            "store" => Token::Store,
            "print" => Token::Print,
            "return" => Token::Return,
            "jz" => Token::Jz,
            "jump" => Token::Jump,
            "fp" => Token::Fp,
            _ => temp_or_ident(word),
        });

    let token = num.or(ctrl).or(newline).or(word);

    // Blanks and `#` comments run up to, but never across, a newline
    let comment = just('#')
        .then(any().and_is(just('\n').not()).repeated())
        .ignored();
    let blank = one_of(" \t\r").ignored().or(comment).repeated();

    blank.clone().ignore_then(
        token
            .map_with(|tok, e| (tok, e.span()))
            .then_ignore(blank)
            // If we encounter an error, skip and attempt to lex the next character as a token instead
            .recover_with(skip_then_retry_until(any().ignored(), end()))
            .repeated()
            .collect(),
    )
}

/// `t<digits>` names a temporary; anything else is a label name.
/// Serials are written without leading zeros so each temp has one spelling.
fn temp_or_ident(word: &str) -> Token<'_> {
    word.strip_prefix('t')
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .filter(|digits| *digits == "0" || !digits.starts_with('0'))
        .and_then(|digits| digits.parse::<u32>().ok())
        .map_or(Token::Ident(word), Token::Temp)
}
