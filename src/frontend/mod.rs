//! Textual IR reader
//!
//! Reads the line-oriented listing format the driver accepts:
//!
//! ```text
//! # comment
//! t0 = 5
//! t1 = load @x
//! t2 = add t0, t1
//! store t2, [fp-8]
//! jz t2, done
//! jump loop
//! done:
//! return t2
//! ```
//!
//! Temporaries are spelled `t<serial>` with no leading zeros (`t0`, `t7`, `t12`);
//! `t01` is not a temporary. Label names are any other word made of letters,
//! digits, `_` and `.`, except the mnemonics `add sub mul div eq gt lt load store
//! print return jz jump fp` and words that spell a temporary (`t3:` is rejected).
//!
//! Lexing and parsing both recover from errors, so a single run reports every
//! syntax error in the file.

pub mod lexer;
pub mod parser;
pub mod report;

#[cfg(test)]
mod tests;

use crate::backend::ir::{IrCommand, TempFactory};
use crate::common::span::Span;
use chumsky::prelude::*;
use lexer::lexer;
use parser::listing_parser;
use std::fmt;

/// A lexing or parsing error with its location in the source
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    pub span: Span,
    pub message: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}: {}", self.span.start, self.span.end, self.message)
    }
}

/// A parsed listing
#[derive(Debug)]
pub struct Listing {
    /// Commands in source order
    pub commands: Vec<IrCommand>,
    /// Source span of each command, parallel to `commands`
    pub spans: Vec<Span>,
    /// Factory numbering after the highest temporary in the listing
    pub temps: TempFactory,
}

impl Listing {
    pub fn span_of(&self, position: usize) -> Option<Span> {
        self.spans.get(position).copied()
    }
}

/// Lex and parse an IR listing
pub fn parse_listing(src: &str) -> Result<Listing, Vec<SyntaxError>> {
    let (tokens, lex_errors) = lexer().parse(src).into_output_errors();
    let mut errors: Vec<SyntaxError> = lex_errors
        .iter()
        .map(|e| SyntaxError {
            span: *e.span(),
            message: e.to_string(),
        })
        .collect();

    let Some(tokens) = tokens else {
        return Err(errors);
    };

    let eoi: Span = (src.len()..src.len()).into();
    let (commands, parse_errors) = listing_parser()
        .parse(tokens.as_slice().map(eoi, |(t, s)| (t, s)))
        .into_output_errors();
    errors.extend(parse_errors.iter().map(|e| SyntaxError {
        span: *e.span(),
        message: e.to_string(),
    }));

    match commands {
        Some(commands) if errors.is_empty() => {
            let next_serial = commands
                .iter()
                .flat_map(|(cmd, _)| cmd.temps())
                .map(|t| t.serial() + 1)
                .max()
                .unwrap_or(0);
            let (commands, spans) = commands.into_iter().unzip();
            Ok(Listing {
                commands,
                spans,
                temps: TempFactory::starting_at(next_serial),
            })
        }
        _ => Err(errors),
    }
}
