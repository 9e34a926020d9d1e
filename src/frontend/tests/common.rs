use crate::backend::ir::IrCommand;
use crate::common::span::Spanned;
use crate::common::token::Token;
use crate::frontend::lexer::lexer;
use crate::frontend::parser::listing_parser;
use chumsky::prelude::*;

pub fn parse_tokens(src: &str) -> Vec<Spanned<Token<'_>>> {
    lexer().parse(src).into_result().unwrap()
}

pub fn parse_commands(src: &str) -> Vec<IrCommand> {
    let tokens = parse_tokens(src);
    listing_parser()
        .parse(
            tokens
                .as_slice()
                .map((src.len()..src.len()).into(), |(t, s)| (t, s)),
        )
        .into_result()
        .unwrap()
        .into_iter()
        .map(|(cmd, _)| cmd)
        .collect()
}
