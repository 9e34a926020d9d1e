//! Register allocation error types
//!
//! Every failure the allocation pipeline can report. None of them are recovered
//! internally: the passes return them and the caller decides what to do.

use crate::backend::ir::Temp;
use std::fmt;

/// Register allocation error
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegAllocError {
    /// The same label name is defined by two instructions
    DuplicateLabel {
        name: String,
        first: usize,
        second: usize,
    },

    /// A jump names a label no instruction defines
    UnknownLabel { name: String, position: usize },

    /// Simplify found no vertex with fewer than `registers` live neighbours
    AllocationFailure {
        registers: usize,
        uncolorable: Vec<Temp>,
    },

    /// Query for an instruction position past the end of the listing
    PositionOutOfRange { position: usize, len: usize },

    /// Query for a temporary the interference graph does not contain
    TempNotInGraph { temp: Temp },

    /// Register pool with no registers, or with a name listed twice
    InvalidRegisterPool { msg: String },
}

impl RegAllocError {
    /// Whether the instruction listing itself is malformed
    pub fn is_malformed_ir(&self) -> bool {
        matches!(
            self,
            RegAllocError::DuplicateLabel { .. } | RegAllocError::UnknownLabel { .. }
        )
    }

    /// Whether the caller queried a pass outside its domain
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            RegAllocError::PositionOutOfRange { .. } | RegAllocError::TempNotInGraph { .. }
        )
    }
}

impl fmt::Display for RegAllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegAllocError::DuplicateLabel {
                name,
                first,
                second,
            } => {
                write!(
                    f,
                    "Malformed IR: label '{}' defined at instruction {} and again at instruction {}",
                    name, first, second
                )
            }
            RegAllocError::UnknownLabel { name, position } => {
                write!(
                    f,
                    "Malformed IR: instruction {} jumps to undefined label '{}'",
                    position, name
                )
            }
            RegAllocError::AllocationFailure {
                registers,
                uncolorable,
            } => {
                let temps: Vec<String> = uncolorable.iter().map(|t| t.to_string()).collect();
                write!(
                    f,
                    "Register allocation failed: insufficient registers ({} available) to color {{{}}}",
                    registers,
                    temps.join(", ")
                )
            }
            RegAllocError::PositionOutOfRange { position, len } => {
                write!(
                    f,
                    "Instruction position {} out of range for listing of {} instruction(s)",
                    position, len
                )
            }
            RegAllocError::TempNotInGraph { temp } => {
                write!(f, "Temporary {} is not in the interference graph", temp)
            }
            RegAllocError::InvalidRegisterPool { msg } => {
                write!(f, "Invalid register pool: {}", msg)
            }
        }
    }
}

impl std::error::Error for RegAllocError {}
