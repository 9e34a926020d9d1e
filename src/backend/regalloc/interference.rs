//! Interference Graph
//!
//! Two temporaries interfere when one is defined while the other is live on exit
//! from the defining instruction; they must then end up in different registers.
//! Adjacency is keyed by temporary, so the graph holds no references into the
//! instruction listing.

use super::error::RegAllocError;
use super::liveness::LivenessInfo;
use crate::backend::ir::Temp;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Undirected interference graph without self-loops
///
/// Only [`InterferenceGraph::build`] adds vertices and edges; a built graph is
/// read-only outside this crate.
///
/// ```compile_fail
/// use mips_regalloc::backend::{InterferenceGraph, IrCommand, LivenessAnalysis, Temp};
///
/// let liveness = LivenessAnalysis::analyze(&[IrCommand::Return { value: None }]).unwrap();
/// let mut graph = InterferenceGraph::build(&liveness);
/// graph.add_edge(Temp(0), Temp(1));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InterferenceGraph {
    /// Adjacency list: temp -> set of interfering temps. Every vertex has an entry.
    edges: BTreeMap<Temp, BTreeSet<Temp>>,
}

impl InterferenceGraph {
    /// Build the interference graph from completed liveness information
    pub fn build(liveness: &LivenessInfo) -> Self {
        let mut graph = InterferenceGraph::default();

        // Every temp mentioned anywhere is a vertex, even if it never interferes
        for &temp in liveness.live_temps().iter() {
            graph.add_vertex(temp);
        }

        // A definition interferes with everything else live on exit
        for info in liveness.iter() {
            for &def in info.defs.iter() {
                for &live in info.live_out.iter() {
                    graph.add_edge(def, live);
                }
            }
        }

        debug!(
            "interference: {} temp(s), {} edge(s)",
            graph.len(),
            graph.edge_count()
        );
        graph
    }

    pub(crate) fn add_vertex(&mut self, temp: Temp) {
        self.edges.entry(temp).or_default();
    }

    /// Add an edge between two temps. Self-edges are ignored.
    pub(crate) fn add_edge(&mut self, a: Temp, b: Temp) {
        if a == b {
            self.add_vertex(a);
            return;
        }
        self.edges.entry(a).or_default().insert(b);
        self.edges.entry(b).or_default().insert(a);
    }

    /// Get neighbors of a temp, in ascending serial order
    pub fn neighbors(&self, temp: Temp) -> Result<&BTreeSet<Temp>, RegAllocError> {
        self.edges
            .get(&temp)
            .ok_or(RegAllocError::TempNotInGraph { temp })
    }

    /// Get the degree (number of neighbors) of a temp
    pub fn degree(&self, temp: Temp) -> Result<usize, RegAllocError> {
        self.neighbors(temp).map(BTreeSet::len)
    }

    /// All vertices in ascending serial order
    pub fn temps(&self) -> impl Iterator<Item = Temp> + '_ {
        self.edges.keys().copied()
    }

    pub fn contains(&self, temp: Temp) -> bool {
        self.edges.contains_key(&temp)
    }

    pub fn interferes(&self, a: Temp, b: Temp) -> bool {
        self.edges.get(&a).is_some_and(|n| n.contains(&b))
    }

    /// Each undirected edge once, as `(lower, higher)`
    pub fn edges(&self) -> impl Iterator<Item = (Temp, Temp)> + '_ {
        self.edges.iter().flat_map(|(&a, neighbors)| {
            neighbors
                .iter()
                .filter(move |&&b| a < b)
                .map(move |&b| (a, b))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl fmt::Display for InterferenceGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (temp, neighbors) in &self.edges {
            write!(f, "{}:", temp)?;
            for neighbor in neighbors {
                write!(f, " {}", neighbor)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
