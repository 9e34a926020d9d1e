use crate::backend::ir::BinaryOp;
use std::fmt;

// Token definition for IR listings
#[derive(Clone, Debug, PartialEq)]
pub enum Token<'src> {
    Num(i64),
    Temp(u32),
    Ident(&'src str),
    Op(BinaryOp),
    Ctrl(char),
    Newline,
    // Keywords
    Load,
    Store,
    Print,
    Return,
    Jz,
    Jump,
    Fp,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Num(n) => write!(f, "{n}"),
            Token::Temp(n) => write!(f, "t{n}"),
            Token::Ident(s) => write!(f, "{s}"),
            Token::Op(op) => write!(f, "{op}"),
            Token::Ctrl(c) => write!(f, "{c}"),
            Token::Newline => write!(f, "end of line"),
            Token::Load => write!(f, "load"),
            Token::Store => write!(f, "store"),
            Token::Print => write!(f, "print"),
            Token::Return => write!(f, "return"),
            Token::Jz => write!(f, "jz"),
            Token::Jump => write!(f, "jump"),
            Token::Fp => write!(f, "fp"),
        }
    }
}
