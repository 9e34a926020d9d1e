//! Liveness Analysis
//!
//! This module computes, for every IR instruction, which temporaries are live on
//! entry to it and on exit from it. The interference graph is built from these sets.
//!
//! # Algorithm
//!
//! Backward dataflow analysis over single instructions:
//! - in[n]  = USE[n] ∪ (out[n] - DEF[n])
//! - out[n] = ∪ in[s] for all successors s of n
//!
//! Sets are ordered by temporary serial, so every dump and every union is
//! reproducible run to run.

use super::error::RegAllocError;
use crate::backend::ir::{IrCommand, Temp};
use im::OrdSet;
use log::{debug, trace};
use std::collections::HashMap;

/// A set of temporaries, ordered by serial
pub type TempSet = OrdSet<Temp>;

/// Liveness information for a single instruction
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstrLiveness {
    /// Temporaries live on entry
    pub live_in: TempSet,
    /// Temporaries live on exit
    pub live_out: TempSet,
    /// Temporaries written
    pub defs: TempSet,
    /// Temporaries read
    pub uses: TempSet,
    /// Positions control may reach next
    pub successors: Vec<usize>,
}

/// Liveness information for an instruction listing, at its fixpoint
#[derive(Clone, Debug)]
pub struct LivenessInfo {
    instrs: Vec<InstrLiveness>,
    iterations: usize,
}

impl LivenessInfo {
    fn get(&self, position: usize) -> Result<&InstrLiveness, RegAllocError> {
        self.instrs
            .get(position)
            .ok_or(RegAllocError::PositionOutOfRange {
                position,
                len: self.instrs.len(),
            })
    }

    /// Temporaries live on entry to the instruction at `position`
    pub fn live_in(&self, position: usize) -> Result<&TempSet, RegAllocError> {
        self.get(position).map(|i| &i.live_in)
    }

    /// Temporaries live on exit from the instruction at `position`
    pub fn live_out(&self, position: usize) -> Result<&TempSet, RegAllocError> {
        self.get(position).map(|i| &i.live_out)
    }

    pub fn defs(&self, position: usize) -> Result<&TempSet, RegAllocError> {
        self.get(position).map(|i| &i.defs)
    }

    pub fn uses(&self, position: usize) -> Result<&TempSet, RegAllocError> {
        self.get(position).map(|i| &i.uses)
    }

    pub fn successors(&self, position: usize) -> Result<&[usize], RegAllocError> {
        self.get(position).map(|i| i.successors.as_slice())
    }

    /// Number of instructions analyzed
    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    /// Full passes the fixpoint took, including the final pass that changed nothing
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Per-instruction results in listing order
    pub fn iter(&self) -> impl Iterator<Item = &InstrLiveness> {
        self.instrs.iter()
    }

    /// Every temporary defined or used anywhere in the listing
    pub fn live_temps(&self) -> TempSet {
        self.instrs.iter().fold(TempSet::new(), |acc, info| {
            acc.union(info.defs.clone()).union(info.uses.clone())
        })
    }
}

/// Liveness analysis engine
pub struct LivenessAnalysis;

impl LivenessAnalysis {
    /// Analyze liveness for an instruction listing
    pub fn analyze(commands: &[IrCommand]) -> Result<LivenessInfo, RegAllocError> {
        let labels = Self::index_labels(commands)?;
        debug!(
            "liveness: {} instruction(s), {} label(s)",
            commands.len(),
            labels.len()
        );

        // Compute USE, DEF and successors for each instruction
        let mut instrs = Vec::with_capacity(commands.len());
        for (position, cmd) in commands.iter().enumerate() {
            instrs.push(InstrLiveness {
                live_in: TempSet::new(),
                live_out: TempSet::new(),
                defs: cmd.def().into_iter().collect(),
                uses: cmd.uses().into_iter().collect(),
                successors: Self::successors(cmd, position, commands.len(), &labels)?,
            });
        }

        // Fixed-point iteration
        let mut iterations = 0;
        loop {
            iterations += 1;
            if !Self::step(&mut instrs) {
                break;
            }
        }
        debug!("liveness: fixpoint reached after {} pass(es)", iterations);

        Ok(LivenessInfo { instrs, iterations })
    }

    /// Map every label name to the position of its `Label` instruction
    fn index_labels(commands: &[IrCommand]) -> Result<HashMap<&str, usize>, RegAllocError> {
        let mut labels: HashMap<&str, usize> = HashMap::new();
        for (position, cmd) in commands.iter().enumerate() {
            if let Some(name) = cmd.label_name() {
                if let Some(&first) = labels.get(name) {
                    return Err(RegAllocError::DuplicateLabel {
                        name: name.to_string(),
                        first,
                        second: position,
                    });
                }
                labels.insert(name, position);
            }
        }
        Ok(labels)
    }

    /// Positions control may reach after the instruction at `position`
    fn successors(
        cmd: &IrCommand,
        position: usize,
        len: usize,
        labels: &HashMap<&str, usize>,
    ) -> Result<Vec<usize>, RegAllocError> {
        let mut succs = Vec::new();

        if cmd.falls_through() && position + 1 < len {
            succs.push(position + 1);
        }

        if let Some(target) = cmd.jump_target() {
            let &dest = labels
                .get(target)
                .ok_or_else(|| RegAllocError::UnknownLabel {
                    name: target.to_string(),
                    position,
                })?;
            if !succs.contains(&dest) {
                succs.push(dest);
            }
        }

        Ok(succs)
    }

    /// One backward pass over all instructions. Returns whether any set changed.
    fn step(instrs: &mut [InstrLiveness]) -> bool {
        let mut changed = false;

        for position in (0..instrs.len()).rev() {
            // out = union of successors' in
            let new_live_out = instrs[position]
                .successors
                .iter()
                .fold(TempSet::new(), |acc, &succ| {
                    acc.union(instrs[succ].live_in.clone())
                });

            // in = uses ∪ (out - defs)
            let info = &instrs[position];
            let mut new_live_in = info.uses.clone();
            for temp in new_live_out.iter() {
                if !info.defs.contains(temp) {
                    new_live_in.insert(*temp);
                }
            }

            let info = &mut instrs[position];
            if new_live_in != info.live_in || new_live_out != info.live_out {
                trace!(
                    "liveness: [{}] in {:?} out {:?}",
                    position, new_live_in, new_live_out
                );
                changed = true;
                info.live_in = new_live_in;
                info.live_out = new_live_out;
            }
        }

        changed
    }
}
