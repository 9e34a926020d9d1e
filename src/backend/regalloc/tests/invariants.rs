use super::common::{
    assert_fixpoint, assert_sound, assert_symmetric, assert_valid_coloring, listing, run,
    three_regs,
};
use crate::backend::ir::{BinaryOp, IrCommand, Temp, TempFactory};
use crate::backend::regalloc::{LivenessAnalysis, RegAllocError, RegisterPool};
use crate::pipeline::allocate_registers;

const LISTINGS: &[&str] = &[
    // countdown with a running sum
    "t0 = load @n
     t1 = 0
     t2 = 1
     loop:
     jz t0, done
     t1 = add t1, t0
     t0 = sub t0, t2
     jump loop
     done:
     print t1
     return t1",
    // nested conditionals
    "t0 = load @x
     t1 = load @y
     t2 = gt t0, t1
     jz t2, small
     t3 = sub t0, t1
     jz t3, same
     print t3
     jump end
     same:
     t4 = 0
     print t4
     jump end
     small:
     t5 = sub t1, t0
     print t5
     end:
     return",
    // stores keep values live across loads
    "t0 = 10
     t1 = load [fp-4]
     t2 = mul t0, t1
     store t2, [fp-8]
     t3 = load [fp-8]
     t4 = div t3, t0
     t5 = eq t4, t1
     store t5, @flag
     return t5",
    // a value live across a back edge that is redefined on every trip
    "t0 = 3
     head:
     t1 = lt t0, t0
     jz t0, exit
     t0 = sub t0, t1
     jump head
     exit:
     return t1",
];

#[test]
fn test_invariants_hold_on_every_listing() {
    for src in LISTINGS {
        let commands = listing(src);
        let run = run(&commands, three_regs());

        assert_fixpoint(&run.liveness);
        assert_symmetric(&run.graph);
        assert_sound(&run.liveness, &run.graph);
        let allocation = run.allocation.unwrap();
        assert_valid_coloring(&run.graph, &allocation);
    }
}

#[test]
fn test_terminals_have_nothing_live_out() {
    for src in LISTINGS {
        let commands = listing(src);
        let liveness = LivenessAnalysis::analyze(&commands).unwrap();
        for (n, cmd) in commands.iter().enumerate() {
            if matches!(cmd, IrCommand::Return { .. }) {
                assert!(liveness.live_out(n).unwrap().is_empty());
            }
        }
    }
}

#[test]
fn test_reanalysis_reaches_the_same_fixpoint() {
    for src in LISTINGS {
        let commands = listing(src);
        let first = LivenessAnalysis::analyze(&commands).unwrap();
        let second = LivenessAnalysis::analyze(&commands).unwrap();

        assert_eq!(first.iterations(), second.iterations());
        assert!(first.iter().eq(second.iter()));
    }
}

#[test]
fn test_allocation_is_deterministic() {
    for src in LISTINGS {
        let commands = listing(src);
        let first = allocate_registers(&commands, &RegisterPool::mips()).unwrap();
        let second = allocate_registers(&commands, &RegisterPool::mips()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }
}

#[test]
fn test_every_temp_in_the_listing_gets_a_register() {
    for src in LISTINGS {
        let commands = listing(src);
        let allocation = allocate_registers(&commands, &RegisterPool::mips()).unwrap();
        for temp in commands.iter().flat_map(|c| c.temps()) {
            assert!(allocation.register(temp).is_some(), "{} unassigned", temp);
        }
    }
}

/// Define `n` temps, then fold them into an accumulator so all `n` are live at
/// the last definition
fn pressure(n: usize) -> (Vec<IrCommand>, Vec<Temp>) {
    let mut temps = TempFactory::new();
    let mut commands = Vec::new();
    let values: Vec<Temp> = (0..n).map(|_| temps.fresh()).collect();

    for (i, &dst) in values.iter().enumerate() {
        commands.push(IrCommand::ConstInt {
            dst,
            value: i as i64,
        });
    }

    let mut acc = values[0];
    for &value in &values[1..] {
        let sum = temps.fresh();
        commands.push(IrCommand::BinOp {
            op: BinaryOp::Add,
            dst: sum,
            lhs: acc,
            rhs: value,
        });
        acc = sum;
    }
    commands.push(IrCommand::Return { value: Some(acc) });

    (commands, values)
}

#[test]
fn test_register_pressure_at_the_limit() {
    let (commands, values) = pressure(10);

    let allocation = allocate_registers(&commands, &RegisterPool::mips()).unwrap();
    assert_eq!(allocation.registers_used().len(), 10);

    let err = allocate_registers(&commands, &RegisterPool::with_size(9).unwrap()).unwrap_err();
    match err {
        RegAllocError::AllocationFailure {
            registers,
            uncolorable,
        } => {
            assert_eq!(registers, 9);
            assert!(values.iter().all(|v| uncolorable.contains(v)));
        }
        other => panic!("expected allocation failure, got {other:?}"),
    }
}

#[test]
fn test_single_register_pool() {
    let commands = listing(
        "t0 = 1
         print t0
         t1 = 2
         print t1
         return",
    );
    let pool = RegisterPool::new(["$v0"]).unwrap();
    let allocation = allocate_registers(&commands, &pool).unwrap();

    assert_eq!(allocation.register(Temp(0)), Some("$v0"));
    assert_eq!(allocation.register(Temp(1)), Some("$v0"));
}
