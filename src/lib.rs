//! Register allocation for a MIPS-like three-address IR
//!
//! Liveness analysis over a flat instruction listing, an interference graph built
//! from definition sites, and Chaitin simplify/select colouring onto a fixed pool of
//! physical registers. See [`pipeline::allocate_registers`] for the one-call entry
//! point.

pub mod backend;
pub mod common;
pub mod frontend;
pub mod pipeline;
