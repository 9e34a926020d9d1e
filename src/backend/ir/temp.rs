//! Temporaries
//!
//! A temporary is the symbolic register the IR producer writes into. Identity is
//! the serial number, so two temporaries are the same value iff their serials are
//! equal, and ordering by serial is what every pass uses for determinism.

use std::fmt;

/// A symbolic temporary (before physical allocation)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Temp(pub u32);

impl Temp {
    pub fn serial(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Source of fresh temporaries
#[derive(Debug, Default)]
pub struct TempFactory {
    next_serial: u32,
}

impl TempFactory {
    pub fn new() -> Self {
        Self { next_serial: 0 }
    }

    /// Continue numbering after temporaries that already exist
    pub fn starting_at(next_serial: u32) -> Self {
        Self { next_serial }
    }

    /// Produce a temporary no earlier call has produced
    pub fn fresh(&mut self) -> Temp {
        let serial = self.next_serial;
        self.next_serial += 1;
        Temp(serial)
    }

    /// Get the number of temporaries handed out so far
    pub fn count(&self) -> u32 {
        self.next_serial
    }
}
