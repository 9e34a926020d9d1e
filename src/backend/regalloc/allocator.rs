//! Register Allocator
//!
//! This module implements Chaitin-style graph colouring of the interference graph
//! with a fixed pool of K physical registers.
//!
//! # Algorithm
//!
//! 1. Simplify: repeatedly remove a temp with fewer than K remaining neighbours and
//!    push it on a stack. If every remaining temp has K or more, give up.
//! 2. Select: pop temps and give each the first register its coloured neighbours
//!    are not using.
//!
//! There is no coalescing and no spilling: an uncolourable graph is reported as
//! [`RegAllocError::AllocationFailure`].

use super::error::RegAllocError;
use super::interference::InterferenceGraph;
use super::regs::{PhysReg, RegisterPool};
use crate::backend::ir::Temp;
use log::{debug, trace, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Where a temp is in the simplify/select pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
    Worklist,
    OnStack,
    Colored,
}

/// Result of register allocation: every temp of the graph mapped to a register
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    assignments: BTreeMap<Temp, PhysReg>,
    pool: RegisterPool,
}

impl Allocation {
    /// Name of the register assigned to `temp`
    pub fn register(&self, temp: Temp) -> Option<&str> {
        self.assignments
            .get(&temp)
            .and_then(|&reg| self.pool.name(reg))
    }

    pub fn phys_reg(&self, temp: Temp) -> Option<PhysReg> {
        self.assignments.get(&temp).copied()
    }

    pub fn contains(&self, temp: Temp) -> bool {
        self.assignments.contains_key(&temp)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Assignments in ascending temp order
    pub fn iter(&self) -> impl Iterator<Item = (Temp, &str)> + '_ {
        self.assignments
            .iter()
            .filter_map(|(&temp, &reg)| self.pool.name(reg).map(|name| (temp, name)))
    }

    /// Distinct registers in use, in pool order
    pub fn registers_used(&self) -> Vec<&str> {
        let used: BTreeSet<PhysReg> = self.assignments.values().copied().collect();
        used.into_iter()
            .filter_map(|reg| self.pool.name(reg))
            .collect()
    }

    pub fn pool(&self) -> &RegisterPool {
        &self.pool
    }

    /// Temp -> register name, for the code emitter
    pub fn to_map(&self) -> BTreeMap<Temp, String> {
        self.iter()
            .map(|(temp, name)| (temp, name.to_string()))
            .collect()
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (temp, name) in self.iter() {
            writeln!(f, "{} -> {}", temp, name)?;
        }
        Ok(())
    }
}

/// Graph colouring register allocator
#[derive(Clone, Debug, Default)]
pub struct RegisterAllocator {
    /// Available physical registers, in preference order
    pool: RegisterPool,
}

impl RegisterAllocator {
    pub fn new(pool: RegisterPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &RegisterPool {
        &self.pool
    }

    /// Number of available registers
    pub fn num_regs(&self) -> usize {
        self.pool.len()
    }

    /// Colour `graph` with the pool's registers
    pub fn allocate(&self, graph: &InterferenceGraph) -> Result<Allocation, RegAllocError> {
        let mut states: BTreeMap<Temp, NodeState> =
            graph.temps().map(|t| (t, NodeState::Worklist)).collect();

        let stack = self.simplify(graph, &mut states)?;
        let assignments = self.select(graph, stack, &mut states)?;

        debug!(
            "allocator: colored {} temp(s) with {} of {} register(s)",
            assignments.len(),
            assignments.values().collect::<BTreeSet<_>>().len(),
            self.num_regs()
        );

        Ok(Allocation {
            assignments,
            pool: self.pool.clone(),
        })
    }

    /// Simplify phase: repeatedly remove temps with degree < k
    fn simplify(
        &self,
        graph: &InterferenceGraph,
        states: &mut BTreeMap<Temp, NodeState>,
    ) -> Result<Vec<Temp>, RegAllocError> {
        let k = self.num_regs();
        let mut worklist: BTreeSet<Temp> = graph.temps().collect();
        let mut stack: Vec<Temp> = Vec::with_capacity(worklist.len());

        // Effective degree: neighbours not yet on the stack
        let mut current_degree: BTreeMap<Temp, usize> = BTreeMap::new();
        for &temp in &worklist {
            current_degree.insert(temp, graph.degree(temp)?);
        }

        while !worklist.is_empty() {
            let candidate = worklist
                .iter()
                .copied()
                .find(|t| current_degree.get(t).is_some_and(|&deg| deg < k));

            let Some(temp) = candidate else {
                let uncolorable: Vec<Temp> = worklist.into_iter().collect();
                warn!(
                    "allocator: no temp with fewer than {} live neighbours among {} remaining",
                    k,
                    uncolorable.len()
                );
                return Err(RegAllocError::AllocationFailure {
                    registers: k,
                    uncolorable,
                });
            };

            trace!(
                "allocator: push {} (effective degree {})",
                temp,
                current_degree.get(&temp).copied().unwrap_or_default()
            );
            worklist.remove(&temp);
            stack.push(temp);
            states.insert(temp, NodeState::OnStack);

            // Decrease degree of neighbours still in the graph
            for neighbor in graph.neighbors(temp)? {
                if states.get(neighbor) == Some(&NodeState::Worklist)
                    && let Some(deg) = current_degree.get_mut(neighbor)
                {
                    *deg = deg.saturating_sub(1);
                }
            }
        }

        Ok(stack)
    }

    /// Select phase: assign registers by popping from the stack
    fn select(
        &self,
        graph: &InterferenceGraph,
        mut stack: Vec<Temp>,
        states: &mut BTreeMap<Temp, NodeState>,
    ) -> Result<BTreeMap<Temp, PhysReg>, RegAllocError> {
        let mut assignments: BTreeMap<Temp, PhysReg> = BTreeMap::new();

        while let Some(temp) = stack.pop() {
            debug_assert_eq!(states.get(&temp), Some(&NodeState::OnStack));

            // Registers taken by neighbours that already have one
            let neighbor_regs: BTreeSet<PhysReg> = graph
                .neighbors(temp)?
                .iter()
                .filter_map(|n| assignments.get(n).copied())
                .collect();

            // Simplify pushed `temp` with fewer than k live neighbours, so one is free
            let reg = self
                .pool
                .regs()
                .find(|r| !neighbor_regs.contains(r))
                .ok_or_else(|| RegAllocError::AllocationFailure {
                    registers: self.num_regs(),
                    uncolorable: vec![temp],
                })?;

            trace!("allocator: {} -> {}", temp, self.pool.name(reg).unwrap_or("?"));
            assignments.insert(temp, reg);
            states.insert(temp, NodeState::Colored);
        }

        Ok(assignments)
    }
}
