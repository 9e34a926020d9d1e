//! Register Allocation
//!
//! This module maps IR temporaries to the physical registers of a flat pool.
//!
//! # Pipeline
//!
//! ```text
//! IR (temps) → Liveness Analysis → Interference Graph → Simplify/Select → Temp → register
//! ```

pub mod allocator;
pub mod error;
pub mod interference;
pub mod liveness;
pub mod regs;

#[cfg(test)]
mod tests;

pub use allocator::{Allocation, NodeState, RegisterAllocator};
pub use error::RegAllocError;
pub use interference::InterferenceGraph;
pub use liveness::{InstrLiveness, LivenessAnalysis, LivenessInfo, TempSet};
pub use regs::{MIPS_TEMPORARIES, PhysReg, RegisterPool};
