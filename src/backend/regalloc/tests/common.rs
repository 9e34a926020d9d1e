use crate::backend::ir::{IrCommand, Temp};
use crate::backend::regalloc::{
    Allocation, InterferenceGraph, LivenessAnalysis, LivenessInfo, RegAllocError,
    RegisterAllocator, RegisterPool, TempSet,
};
use crate::frontend::parse_listing;

/// Commands of a textual listing; panics on syntax errors
pub fn listing(src: &str) -> Vec<IrCommand> {
    parse_listing(src).unwrap().commands
}

/// Three registers R0, R1, R2
pub fn three_regs() -> RegisterPool {
    RegisterPool::new(["R0", "R1", "R2"]).unwrap()
}

pub fn set(temps: &[u32]) -> TempSet {
    temps.iter().map(|&t| Temp(t)).collect()
}

pub struct Run {
    pub liveness: LivenessInfo,
    pub graph: InterferenceGraph,
    pub allocation: Result<Allocation, RegAllocError>,
}

pub fn run(commands: &[IrCommand], pool: RegisterPool) -> Run {
    let liveness = LivenessAnalysis::analyze(commands).unwrap();
    let graph = InterferenceGraph::build(&liveness);
    let allocation = RegisterAllocator::new(pool).allocate(&graph);
    Run {
        liveness,
        graph,
        allocation,
    }
}

/// in = use ∪ (out - def) and out = ∪ in[succ] at every instruction
pub fn assert_fixpoint(liveness: &LivenessInfo) {
    for n in 0..liveness.len() {
        let live_in = liveness.live_in(n).unwrap();
        let live_out = liveness.live_out(n).unwrap();
        let defs = liveness.defs(n).unwrap();
        let uses = liveness.uses(n).unwrap();

        let expected_in = uses
            .clone()
            .union(live_out.clone().relative_complement(defs.clone()));
        assert_eq!(live_in, &expected_in, "in[{}]", n);

        let expected_out = liveness
            .successors(n)
            .unwrap()
            .iter()
            .fold(TempSet::new(), |acc, &s| {
                acc.union(liveness.live_in(s).unwrap().clone())
            });
        assert_eq!(live_out, &expected_out, "out[{}]", n);
    }
}

/// Symmetric adjacency, no self-loops
pub fn assert_symmetric(graph: &InterferenceGraph) {
    for u in graph.temps() {
        let neighbors = graph.neighbors(u).unwrap();
        assert!(!neighbors.contains(&u), "{} interferes with itself", u);
        for &v in neighbors {
            assert!(graph.neighbors(v).unwrap().contains(&u), "{} -> {} only", u, v);
        }
    }
}

/// Every def interferes with everything else live on exit
pub fn assert_sound(liveness: &LivenessInfo, graph: &InterferenceGraph) {
    for info in liveness.iter() {
        for &d in info.defs.iter() {
            for &l in info.live_out.iter() {
                if d != l {
                    assert!(graph.interferes(d, l), "missing edge {} - {}", d, l);
                }
            }
        }
    }
}

/// Neighbours differ and every vertex has a register from the pool
pub fn assert_valid_coloring(graph: &InterferenceGraph, allocation: &Allocation) {
    for temp in graph.temps() {
        let reg = allocation
            .register(temp)
            .unwrap_or_else(|| panic!("{} has no register", temp));
        assert!(allocation.pool().names().iter().any(|name| name == reg));
    }
    for (u, v) in graph.edges() {
        assert_ne!(
            allocation.register(u),
            allocation.register(v),
            "{} and {} share a register",
            u,
            v
        );
    }
    assert_eq!(allocation.len(), graph.len());
}
