use mips_regalloc::backend::{Allocation, InterferenceGraph, IrCommand, LivenessInfo, TempSet};

/// Format a temp set as `{t0, t1}`
pub fn format_set(set: &TempSet) -> String {
    let temps: Vec<String> = set.iter().map(|t| t.to_string()).collect();
    format!("{{{}}}", temps.join(", "))
}

/// One line per instruction with its live-in and live-out sets
pub fn format_liveness(commands: &[IrCommand], liveness: &LivenessInfo) -> String {
    let width = commands
        .iter()
        .map(|cmd| cmd.to_string().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (n, (cmd, info)) in commands.iter().zip(liveness.iter()).enumerate() {
        out.push_str(&format!(
            "{:>3}  {:<width$}  in: {}  out: {}\n",
            n,
            cmd.to_string(),
            format_set(&info.live_in),
            format_set(&info.live_out),
            width = width
        ));
    }
    out.push_str(&format!(
        "fixpoint after {} pass(es)\n",
        liveness.iterations()
    ));
    out
}

pub fn format_graph(graph: &InterferenceGraph) -> String {
    format!(
        "{} temp(s), {} edge(s)\n{}",
        graph.len(),
        graph.edge_count(),
        graph
    )
}

pub fn format_allocation(allocation: &Allocation) -> String {
    format!(
        "{}{} temp(s) in {} of {} register(s)\n",
        allocation,
        allocation.len(),
        allocation.registers_used().len(),
        allocation.pool().len()
    )
}
