//! Register Allocation Pipeline
//!
//! This module runs the allocation passes end to end over an IR listing.
//!
//! # Pipeline Stages
//!
//! ```text
//! Listing text (&str)
//!     │
//!     ▼ lexer + parser          (optional, see `compile`)
//! Commands (Vec<IrCommand>)
//!     │
//!     ▼ liveness
//! in/out sets (LivenessInfo)
//!     │
//!     ▼ interference
//! Graph (InterferenceGraph)
//!     │
//!     ▼ simplify/select
//! Temp → register (Allocation)
//! ```

use crate::backend::ir::IrCommand;
use crate::backend::regalloc::{
    Allocation, InterferenceGraph, LivenessAnalysis, LivenessInfo, RegAllocError,
    RegisterAllocator, RegisterPool,
};
use crate::frontend::{Listing, SyntaxError, parse_listing};
use std::fmt;

/// Pipeline error types
#[derive(Debug)]
pub enum PipelineError {
    /// The listing text could not be lexed or parsed
    Syntax(Vec<SyntaxError>),
    /// Liveness or allocation rejected the listing
    RegAlloc(RegAllocError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Syntax(errors) => {
                write!(f, "Syntax error: ")?;
                let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "{}", msgs.join("; "))
            }
            PipelineError::RegAlloc(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<RegAllocError> for PipelineError {
    fn from(e: RegAllocError) -> Self {
        PipelineError::RegAlloc(e)
    }
}

/// Every intermediate result of one allocation run
#[derive(Debug)]
pub struct RegAllocOutput {
    pub liveness: LivenessInfo,
    pub graph: InterferenceGraph,
    pub allocation: Allocation,
}

/// Allocate registers for an instruction listing
///
/// This is the main entry point for the code emitter: it returns a register for
/// every temporary mentioned in `commands`, or the first error encountered.
///
/// # Example
///
/// ```
/// use mips_regalloc::backend::{IrCommand, RegisterPool, Temp};
/// use mips_regalloc::pipeline::allocate_registers;
///
/// let commands = vec![
///     IrCommand::ConstInt { dst: Temp(0), value: 1 },
///     IrCommand::PrintInt { src: Temp(0) },
///     IrCommand::Return { value: None },
/// ];
/// let allocation = allocate_registers(&commands, &RegisterPool::mips()).unwrap();
/// assert_eq!(allocation.register(Temp(0)), Some("$t0"));
/// ```
pub fn allocate_registers(
    commands: &[IrCommand],
    pool: &RegisterPool,
) -> Result<Allocation, RegAllocError> {
    run(commands, pool).map(|output| output.allocation)
}

/// Run liveness, interference and colouring, keeping every intermediate result
pub fn run(commands: &[IrCommand], pool: &RegisterPool) -> Result<RegAllocOutput, RegAllocError> {
    // Stage 1: Liveness
    let liveness = LivenessAnalysis::analyze(commands)?;

    // Stage 2: Interference graph
    let graph = InterferenceGraph::build(&liveness);

    // Stage 3: Simplify/select
    let allocation = RegisterAllocator::new(pool.clone()).allocate(&graph)?;

    Ok(RegAllocOutput {
        liveness,
        graph,
        allocation,
    })
}

/// Parse a textual listing and allocate registers for it
///
/// # Example
///
/// ```
/// use mips_regalloc::backend::{RegisterPool, Temp};
/// use mips_regalloc::pipeline::compile;
///
/// let (_, output) = compile("t0 = 4\nprint t0\nreturn", &RegisterPool::mips()).unwrap();
/// assert_eq!(output.allocation.register(Temp(0)), Some("$t0"));
/// ```
pub fn compile(
    source: &str,
    pool: &RegisterPool,
) -> Result<(Listing, RegAllocOutput), PipelineError> {
    let listing = parse_listing(source).map_err(PipelineError::Syntax)?;
    let output = run(&listing.commands, pool)?;
    Ok((listing, output))
}
