//! IR commands
//!
//! The three-address instruction set handed to the register allocator. Every
//! variant states which temporaries it writes and reads, and how control leaves it.

use super::temp::Temp;
use std::fmt;

/// Integer binary operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Gt,
    Lt,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 7] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Eq,
        BinaryOp::Gt,
        BinaryOp::Lt,
    ];

    pub fn mnemonic(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Eq => "eq",
            BinaryOp::Gt => "gt",
            BinaryOp::Lt => "lt",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Memory operand of a load or store. Never names a temporary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Address {
    /// @name
    Global(String),
    /// [fp+offset]
    Frame(i64),
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Address::Global(name) => write!(f, "@{}", name),
            Address::Frame(offset) if *offset < 0 => write!(f, "[fp{}]", offset),
            Address::Frame(offset) => write!(f, "[fp+{}]", offset),
        }
    }
}

/// A single IR instruction
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IrCommand {
    /// dst = op lhs, rhs
    BinOp {
        op: BinaryOp,
        dst: Temp,
        lhs: Temp,
        rhs: Temp,
    },
    /// dst = value
    ConstInt { dst: Temp, value: i64 },
    /// dst = load addr
    Load { dst: Temp, addr: Address },
    /// store src, addr
    Store { src: Temp, addr: Address },
    /// print src
    PrintInt { src: Temp },
    /// return [value]
    Return { value: Option<Temp> },
    /// jz cond, target
    JumpIfZero { cond: Temp, target: String },
    /// jump target
    Jump { target: String },
    /// name:
    Label { name: String },
}

impl IrCommand {
    /// The temporary written by this instruction, if any
    pub fn def(&self) -> Option<Temp> {
        match self {
            IrCommand::BinOp { dst, .. }
            | IrCommand::ConstInt { dst, .. }
            | IrCommand::Load { dst, .. } => Some(*dst),
            IrCommand::Store { .. }
            | IrCommand::PrintInt { .. }
            | IrCommand::Return { .. }
            | IrCommand::JumpIfZero { .. }
            | IrCommand::Jump { .. }
            | IrCommand::Label { .. } => None,
        }
    }

    /// The temporaries read by this instruction
    pub fn uses(&self) -> Vec<Temp> {
        match self {
            IrCommand::BinOp { lhs, rhs, .. } => vec![*lhs, *rhs],
            IrCommand::Store { src, .. } | IrCommand::PrintInt { src } => vec![*src],
            IrCommand::Return { value } => value.iter().copied().collect(),
            IrCommand::JumpIfZero { cond, .. } => vec![*cond],
            IrCommand::ConstInt { .. }
            | IrCommand::Load { .. }
            | IrCommand::Jump { .. }
            | IrCommand::Label { .. } => vec![],
        }
    }

    /// Whether control may continue with the next instruction in the listing
    pub fn falls_through(&self) -> bool {
        !matches!(self, IrCommand::Return { .. } | IrCommand::Jump { .. })
    }

    /// Label this instruction may branch to
    pub fn jump_target(&self) -> Option<&str> {
        match self {
            IrCommand::JumpIfZero { target, .. } | IrCommand::Jump { target } => Some(target),
            _ => None,
        }
    }

    /// Name defined by a label instruction
    pub fn label_name(&self) -> Option<&str> {
        match self {
            IrCommand::Label { name } => Some(name),
            _ => None,
        }
    }

    /// Every temporary mentioned by this instruction, defs first
    pub fn temps(&self) -> impl Iterator<Item = Temp> {
        self.def().into_iter().chain(self.uses())
    }
}

impl fmt::Display for IrCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IrCommand::BinOp { op, dst, lhs, rhs } => {
                write!(f, "{} = {} {}, {}", dst, op, lhs, rhs)
            }
            IrCommand::ConstInt { dst, value } => write!(f, "{} = {}", dst, value),
            IrCommand::Load { dst, addr } => write!(f, "{} = load {}", dst, addr),
            IrCommand::Store { src, addr } => write!(f, "store {}, {}", src, addr),
            IrCommand::PrintInt { src } => write!(f, "print {}", src),
            IrCommand::Return { value: Some(value) } => write!(f, "return {}", value),
            IrCommand::Return { value: None } => write!(f, "return"),
            IrCommand::JumpIfZero { cond, target } => write!(f, "jz {}, {}", cond, target),
            IrCommand::Jump { target } => write!(f, "jump {}", target),
            IrCommand::Label { name } => write!(f, "{}:", name),
        }
    }
}
