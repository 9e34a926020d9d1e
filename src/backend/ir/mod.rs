//! Three-address IR consumed by register allocation
//!
//! The IR producer hands the backend a flat listing of [`IrCommand`]s over an
//! unbounded supply of [`Temp`]oraries. Labels are ordinary instructions; jumps name
//! them by string.

pub mod command;
pub mod temp;

pub use command::{Address, BinaryOp, IrCommand};
pub use temp::{Temp, TempFactory};
