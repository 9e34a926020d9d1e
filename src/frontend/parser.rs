use crate::backend::ir::{Address, BinaryOp, IrCommand, Temp};
use crate::common::span::{Span, Spanned};
use crate::common::token::Token;
use chumsky::{input::ValueInput, prelude::*};

/// Right-hand side of `tN = ...`
enum Rhs {
    BinOp(BinaryOp, Temp, Temp),
    Load(Address),
    Const(i64),
}

// Listing parser: one command per line, blank lines allowed
pub fn listing_parser<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, Vec<Spanned<IrCommand>>, extra::Err<Rich<'tokens, Token<'src>, Span>>>
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = Span>,
{
    let command = command_parser();

    command
        .separated_by(just(Token::Newline).repeated().at_least(1))
        .allow_leading()
        .allow_trailing()
        .collect::<Vec<_>>()
}

// Single command parser
pub fn command_parser<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, Spanned<IrCommand>, extra::Err<Rich<'tokens, Token<'src>, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = Span>,
{
    let temp = select! { Token::Temp(n) => Temp(n) }.labelled("temporary");
    let label = select! { Token::Ident(name) => name.to_string() }.labelled("label");
    let comma = just(Token::Ctrl(','));

    // Signed integer literal
    let int = just(Token::Ctrl('-'))
        .or_not()
        .then(select! { Token::Num(n) => n })
        .map(|(minus, n)| if minus.is_some() { -n } else { n })
        .labelled("integer");

    // @name or [fp], [fp+N], [fp-N]
    let offset = choice((
        just(Token::Ctrl('+')).to(1i64),
        just(Token::Ctrl('-')).to(-1i64),
    ))
    .then(select! { Token::Num(n) => n })
    .map(|(sign, n)| sign * n)
    .or_not()
    .map(Option::unwrap_or_default);
    let address = choice((
        just(Token::Ctrl('@'))
            .ignore_then(label.clone())
            .map(Address::Global),
        just(Token::Fp)
            .ignore_then(offset)
            .delimited_by(just(Token::Ctrl('[')), just(Token::Ctrl(']')))
            .map(Address::Frame),
    ))
    .labelled("address");

    // tN = op tA, tB | tN = load addr | tN = imm
    let rhs = choice((
        select! { Token::Op(op) => op }
            .then(temp.clone())
            .then_ignore(comma.clone())
            .then(temp.clone())
            .map(|((op, lhs), rhs)| Rhs::BinOp(op, lhs, rhs)),
        just(Token::Load)
            .ignore_then(address.clone())
            .map(Rhs::Load),
        int.map(Rhs::Const),
    ));
    let assign = temp
        .clone()
        .then_ignore(just(Token::Ctrl('=')))
        .then(rhs)
        .map(|(dst, rhs)| match rhs {
            Rhs::BinOp(op, lhs, rhs) => IrCommand::BinOp { op, dst, lhs, rhs },
            Rhs::Load(addr) => IrCommand::Load { dst, addr },
            Rhs::Const(value) => IrCommand::ConstInt { dst, value },
        });

    let store = just(Token::Store)
        .ignore_then(temp.clone())
        .then_ignore(comma.clone())
        .then(address)
        .map(|(src, addr)| IrCommand::Store { src, addr });

    let print = just(Token::Print)
        .ignore_then(temp.clone())
        .map(|src| IrCommand::PrintInt { src });

    let ret = just(Token::Return)
        .ignore_then(temp.clone().or_not())
        .map(|value| IrCommand::Return { value });

    let jz = just(Token::Jz)
        .ignore_then(temp)
        .then_ignore(comma)
        .then(label.clone())
        .map(|(cond, target)| IrCommand::JumpIfZero { cond, target });

    let jump = just(Token::Jump)
        .ignore_then(label.clone())
        .map(|target| IrCommand::Jump { target });

    let label_def = label
        .then_ignore(just(Token::Ctrl(':')))
        .map(|name| IrCommand::Label { name });

    choice((assign, store, print, ret, jz, jump, label_def))
        .map_with(|cmd, e| (cmd, e.span()))
        .labelled("instruction")
        .boxed()
}
