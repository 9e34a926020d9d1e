use super::common::{assert_valid_coloring, listing, run, set, three_regs};
use crate::backend::ir::Temp;
use crate::backend::regalloc::{RegAllocError, RegisterPool};

#[test]
fn test_straight_line() {
    // a = t0, b = t1, c = t2
    let commands = listing(
        "t0 = 1
         t1 = 2
         t2 = add t0, t1
         print t2
         return",
    );
    let run = run(&commands, three_regs());

    assert!(run.graph.interferes(Temp(1), Temp(0)));
    assert_eq!(run.graph.degree(Temp(2)).unwrap(), 0);
    assert_eq!(run.liveness.live_out(2).unwrap(), &set(&[2]));

    let allocation = run.allocation.unwrap();
    assert_valid_coloring(&run.graph, &allocation);
    insta::assert_snapshot!(allocation.to_string(), @r"
    t0 -> R1
    t1 -> R0
    t2 -> R0
    ");
}

#[test]
fn test_loop_through_conditional_jump() {
    // n = t0, one = t1
    let commands = listing(
        "top:
         t0 = sub t0, t1
         jz t0, end
         jump top
         end:
         return",
    );
    let run = run(&commands, three_regs());

    assert!(run.liveness.live_in(0).unwrap().contains(&Temp(0)));
    assert!(run.liveness.live_in(0).unwrap().contains(&Temp(1)));
    assert!(run.graph.interferes(Temp(0), Temp(1)));

    let allocation = run.allocation.unwrap();
    assert_ne!(allocation.register(Temp(0)), allocation.register(Temp(1)));
    assert_valid_coloring(&run.graph, &allocation);
}

#[test]
fn test_dead_definition() {
    let commands = listing(
        "t0 = 5
         t0 = 6
         print t0
         return",
    );
    let run = run(&commands, three_regs());

    assert!(run.liveness.live_out(0).unwrap().is_empty());
    assert_eq!(run.graph.temps().collect::<Vec<_>>(), vec![Temp(0)]);
    assert_eq!(run.graph.edge_count(), 0);
    assert_eq!(run.allocation.unwrap().register(Temp(0)), Some("R0"));
}

#[test]
fn test_three_parallel_live_ranges_need_three_registers() {
    let src = "t0 = 1
               t1 = 2
               t2 = 3
               t3 = add t0, t1
               t4 = add t3, t2
               print t4
               return";
    let commands = listing(src);

    let two = run(&commands, RegisterPool::numbered("R", 2).unwrap());
    assert!(two.graph.interferes(Temp(0), Temp(1)));
    assert!(two.graph.interferes(Temp(0), Temp(2)));
    assert!(two.graph.interferes(Temp(1), Temp(2)));
    assert_eq!(
        two.allocation.unwrap_err(),
        RegAllocError::AllocationFailure {
            registers: 2,
            uncolorable: vec![Temp(0), Temp(1), Temp(2)],
        }
    );

    let three = run(&commands, three_regs());
    assert_valid_coloring(&three.graph, &three.allocation.unwrap());
}

#[test]
fn test_branch_merge() {
    // c = t0, a = t1
    let commands = listing(
        "jz t0, else
         t1 = 1
         jump merge
         else:
         t1 = 2
         merge:
         print t1
         return",
    );
    let run = run(&commands, three_regs());

    assert_eq!(run.liveness.live_in(0).unwrap(), &set(&[0]));
    assert!(run.liveness.live_out(0).unwrap().is_empty());
    assert_eq!(run.liveness.live_in(5).unwrap(), &set(&[1]));
    assert!(!run.graph.interferes(Temp(0), Temp(1)));
    assert_eq!(run.graph.len(), 2);

    let allocation = run.allocation.unwrap();
    assert_eq!(allocation.register(Temp(0)), Some("R0"));
    assert_eq!(allocation.register(Temp(1)), Some("R0"));
}

#[test]
fn test_live_in_temp_is_colored() {
    // t9 is never defined: it arrives from outside the listing
    let commands = listing(
        "t0 = 1
         t1 = add t0, t9
         store t1, @out
         return",
    );
    let run = run(&commands, three_regs());

    assert_eq!(run.liveness.live_in(0).unwrap(), &set(&[9]));
    assert!(run.graph.interferes(Temp(0), Temp(9)));
    let allocation = run.allocation.unwrap();
    assert!(allocation.contains(Temp(9)));
    assert_valid_coloring(&run.graph, &allocation);
}

#[test]
fn test_return_value_is_live_to_the_end() {
    let commands = listing(
        "t0 = load @x
         t1 = 1
         t2 = add t0, t1
         return t2",
    );
    let run = run(&commands, three_regs());

    assert_eq!(run.liveness.live_in(3).unwrap(), &set(&[2]));
    assert!(run.liveness.live_out(3).unwrap().is_empty());
    insta::assert_snapshot!(run.graph.to_string(), @r"
    t0: t1
    t1: t0
    t2:
    ");
}

#[test]
fn test_code_after_unconditional_jump_is_not_a_successor() {
    let commands = listing(
        "t0 = 1
         jump out
         print t0
         out:
         return",
    );
    let run = run(&commands, three_regs());

    assert_eq!(run.liveness.successors(1).unwrap(), &[3]);
    assert!(run.liveness.live_out(0).unwrap().is_empty());
    // The unreachable print still reads t0
    assert_eq!(run.liveness.live_in(2).unwrap(), &set(&[0]));
}

#[test]
fn test_malformed_listings_are_rejected() {
    let dangling = listing("jz t0, nowhere\nreturn");
    let err = crate::pipeline::run(&dangling, &three_regs()).unwrap_err();
    assert!(err.is_malformed_ir());

    let duplicate = listing("a:\nb:\na:\nreturn");
    let err = crate::pipeline::run(&duplicate, &three_regs()).unwrap_err();
    assert_eq!(
        err,
        RegAllocError::DuplicateLabel {
            name: "a".to_string(),
            first: 0,
            second: 2,
        }
    );
}
