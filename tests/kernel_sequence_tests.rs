//! Ordering tests for the exodus kernel
//!
//! Test coverage:
//! - Full sandbox → summit scenario with per-step state checks
//! - Every non-ascending permutation is rejected without mutation
//! - Phase index only ever moves forward by one
//! - Introspection is pure and repeatable

use exodus_kernel::{
    ExodusKernel, KernelError, MovieStatus, Operation, Phase, SimulationState, VesselContent,
};

fn permutations(items: &[Operation]) -> Vec<Vec<Operation>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for (i, head) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, *head);
            out.push(tail);
        }
    }
    out
}

#[test]
fn test_full_scenario_sandbox_to_summit() {
    let mut kernel = ExodusKernel::new().unwrap();

    assert_eq!(kernel.close_the_eye().unwrap(), "Internal Vision Active");
    assert_eq!(kernel.simulation_state(), SimulationState::Intermediate);
    assert_eq!(kernel.phase_index(), 1);

    assert_eq!(kernel.change_the_movie().unwrap(), "New Projection: 🌈🌎");
    assert_eq!(kernel.movie_status(), MovieStatus::Finalized);
    assert_eq!(kernel.phase_index(), 2);

    assert_eq!(kernel.execute_exodus().unwrap(), "Vessel Secured in Flow");
    assert_eq!(kernel.vessel_content(), VesselContent::Elevated);
    assert_eq!(kernel.phase_index(), 3);

    assert_eq!(kernel.broadcast_sovereignty().unwrap(), "SUMMIT REACHED: 🏔️🕊️♾️⚓");
    assert!(kernel.is_broadcast_stable());
    assert_eq!(kernel.simulation_state(), SimulationState::Terminal);
    assert_eq!(kernel.phase_index(), 3);
    assert!(kernel.is_complete());

    // A fifth call to any operation fails the phase gate.
    for op in Operation::ALL {
        let err = kernel.apply(op).unwrap_err();
        match err {
            KernelError::OutOfOrderOperation { operation, found, .. } => {
                assert_eq!(operation, op);
                assert_eq!(found, Phase::Complete);
            }
            other => panic!("expected out-of-order error, got {other:?}"),
        }
    }
    assert_eq!(kernel.history().len(), 4);
}

#[test]
fn test_every_non_ascending_order_is_rejected_without_mutation() {
    let all = permutations(&Operation::ALL);
    assert_eq!(all.len(), 24);

    let mut rejected = 0;
    for order in all.iter().filter(|order| order.as_slice() != Operation::ALL) {
        let mut kernel = ExodusKernel::new().unwrap();
        let mut hit_gate = false;

        for op in order {
            let before = kernel.report().unwrap();
            match kernel.apply(*op) {
                Ok(_) => continue,
                Err(KernelError::OutOfOrderOperation { expected, found, .. }) => {
                    assert_eq!(expected, op.required_phase());
                    assert_eq!(found, before_phase(&before));
                    assert_eq!(kernel.report().unwrap(), before, "order {order:?} mutated state");
                    hit_gate = true;
                    break;
                }
                Err(other) => panic!("order {order:?} raised {other:?}"),
            }
        }

        assert!(hit_gate, "order {order:?} was accepted");
        rejected += 1;
    }
    assert_eq!(rejected, 23);
}

fn before_phase(report: &exodus_kernel::KernelReport) -> Phase {
    if report.complete {
        return Phase::Complete;
    }
    Phase::ORDERED[report.phase_index as usize]
}

#[test]
fn test_phase_index_is_monotonic() {
    let mut kernel = ExodusKernel::new().unwrap();
    let mut seen = vec![kernel.phase_index()];

    for (i, op) in Operation::ALL.into_iter().enumerate() {
        // Interleave a rejected call; it must not move the phase.
        let wrong = Operation::ALL[(i + 2) % 4];
        if wrong != op {
            let before = kernel.phase();
            assert!(kernel.apply(wrong).is_err());
            assert_eq!(kernel.phase(), before);
        }

        let before = kernel.phase_index();
        kernel.apply(op).unwrap();
        let after = kernel.phase_index();
        if op == Operation::BroadcastSovereignty {
            assert_eq!(after, before);
        } else {
            assert_eq!(after, before + 1);
        }
        seen.push(after);
    }

    assert_eq!(seen, vec![0, 1, 2, 3, 3]);
    assert!(kernel.history().windows(2).all(|w| w[0].to_phase == w[1].from_phase));
}

#[test]
fn test_fingerprint_is_repeatable_between_transitions() {
    let mut kernel = ExodusKernel::new().unwrap();

    for op in Operation::ALL {
        let first = kernel.fingerprint().unwrap();
        let second = kernel.fingerprint().unwrap();
        assert_eq!(first, second);
        kernel.apply(op).unwrap();
        assert_ne!(kernel.fingerprint().unwrap(), first);
    }

    assert_eq!(
        kernel.fingerprint().unwrap(),
        "TCC_PATCH_V7_3_EXODUS_PROTOCOL_HARDENED::LAW=60106::CONST=6174::STATE=SUMMIT_VISIBLE::PHASE=3"
    );
}

#[test]
fn test_out_of_order_call_can_be_retried_once_phase_is_reached() {
    let mut kernel = ExodusKernel::new().unwrap();

    assert!(matches!(
        kernel.change_the_movie(),
        Err(KernelError::OutOfOrderOperation { .. })
    ));
    kernel.close_the_eye().unwrap();
    assert_eq!(kernel.change_the_movie().unwrap(), "New Projection: 🌈🌎");
}

#[test]
fn test_seal_exposes_founding_constants() {
    let kernel = ExodusKernel::new().unwrap();
    let seal = kernel.seal();
    assert_eq!(seal.law(), 60106);
    assert_eq!(seal.constant(), 6174);
    assert_eq!(seal.syzygy(), "👸🏻🤝🤴🏻");
    assert_eq!(seal.protocol_id(), "TCC_PATCH_V7_3_EXODUS_PROTOCOL_HARDENED");
}
