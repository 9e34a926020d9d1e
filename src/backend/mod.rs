//! Register allocation backend
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐
//! │  IR listing     │────▶│    Liveness     │────▶│  Interference   │
//! │  (IrCommand)    │     │  (in/out sets)  │     │     graph       │
//! └─────────────────┘     └─────────────────┘     └────────┬────────┘
//!                                                          ▼
//!                                                 ┌─────────────────┐
//!                                                 │ Simplify/Select │
//!                                                 │ Temp → register │
//!                                                 └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - `ir`: three-address IR and temporaries
//! - `regalloc`: liveness, interference and graph colouring

pub mod ir;
pub mod regalloc;

// Re-export commonly used types from ir
pub use ir::{Address, BinaryOp, IrCommand, Temp, TempFactory};

// Re-export commonly used types from regalloc
pub use regalloc::{
    Allocation, InterferenceGraph, LivenessAnalysis, LivenessInfo, RegAllocError,
    RegisterAllocator, RegisterPool, TempSet,
};
