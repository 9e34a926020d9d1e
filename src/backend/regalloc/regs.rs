//! Physical register pool
//!
//! The allocator colours with indices into an ordered list of register names. The
//! order is the colour preference order: select always takes the first free one.

use super::error::RegAllocError;
use std::collections::HashSet;
use std::fmt;

/// MIPS temporaries handed to the allocator by default
pub const MIPS_TEMPORARIES: &[&str] = &[
    "$t0", "$t1", "$t2", "$t3", "$t4", "$t5", "$t6", "$t7", "$t8", "$t9",
];

/// A physical register, identified by its position in the pool
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysReg(pub usize);

/// Ordered set of distinct register names available for allocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterPool {
    names: Vec<String>,
}

impl RegisterPool {
    /// Build a pool from register names in preference order
    pub fn new<I, S>(names: I) -> Result<Self, RegAllocError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(RegAllocError::InvalidRegisterPool {
                msg: "at least one register is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(RegAllocError::InvalidRegisterPool {
                    msg: format!("register '{}' listed more than once", name),
                });
            }
        }

        Ok(Self { names })
    }

    /// The ten MIPS temporaries `$t0` through `$t9`
    pub fn mips() -> Self {
        Self {
            names: MIPS_TEMPORARIES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// `count` registers named `<prefix>0`, `<prefix>1`, ...
    pub fn numbered(prefix: &str, count: usize) -> Result<Self, RegAllocError> {
        Self::new((0..count).map(|i| format!("{}{}", prefix, i)))
    }

    /// `count` registers named like the MIPS temporaries
    pub fn with_size(count: usize) -> Result<Self, RegAllocError> {
        Self::numbered("$t", count)
    }

    /// K, the number of colours
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, reg: PhysReg) -> Option<&str> {
        self.names.get(reg.0).map(String::as_str)
    }

    /// Registers in preference order
    pub fn regs(&self) -> impl Iterator<Item = PhysReg> + '_ {
        (0..self.names.len()).map(PhysReg)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for RegisterPool {
    fn default() -> Self {
        Self::mips()
    }
}

impl fmt::Display for RegisterPool {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.names.join(", "))
    }
}
