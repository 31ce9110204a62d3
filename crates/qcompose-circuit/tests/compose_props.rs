//! Property tests for composed circuits.

use proptest::prelude::*;
use qcompose_ansatz::AnsatzTemplate;
use qcompose_circuit::{ComposedCircuit, SegmentSpec, compose};
use qcompose_ir::{Axis, ParameterExpression, QubitRegister};
use qcompose_sim::{Hamiltonian, HamiltonianTerm};

const N: u32 = 4;

fn segment() -> impl Strategy<Value = SegmentSpec> {
    prop_oneof![
        (prop::sample::select(vec![Axis::X, Axis::Y, Axis::Z]), prop::collection::vec(-1.0f64..1.0, N as usize))
            .prop_map(|(axis, features)| SegmentSpec::encoder(axis, features)),
        (prop::sample::select(AnsatzTemplate::ALL.to_vec()), 1usize..=2)
            .prop_map(|(template, depth)| SegmentSpec::ansatz(template, depth)),
        (0.1f64..2.0, 1usize..=3).prop_map(|(time, steps)| {
            let h = Hamiltonian::from_terms(vec![
                HamiltonianTerm::zz(0, 1, 1.0),
                HamiltonianTerm::x(2, 0.5),
            ]);
            SegmentSpec::trotter(h, time, steps)
        }),
    ]
}

fn circuit() -> impl Strategy<Value = ComposedCircuit> {
    prop::collection::vec(segment(), 0..4)
        .prop_map(|specs| compose(QubitRegister::new(N), &specs).unwrap())
}

proptest! {
    #[test]
    fn then_is_associative(a in circuit(), b in circuit(), c in circuit()) {
        let left = a.then(&b).unwrap().then(&c).unwrap();
        let right = a.then(&b.then(&c).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn references_stay_in_bounds(c in circuit()) {
        for op in c.gate_ops() {
            for q in op.qubits() {
                prop_assert!(q.0 < N);
            }
            if let Some(slot) = op.angle().and_then(ParameterExpression::max_slot) {
                prop_assert!(slot < c.num_parameters());
            }
        }
    }

    #[test]
    fn slots_never_referenced_before_their_segment(c in circuit()) {
        for composed in c.ops() {
            let span = &c.segments()[composed.provenance.segment];
            for slot in composed.op.angle().map(ParameterExpression::slots).unwrap_or_default() {
                prop_assert!(span.parameters.contains(&slot));
            }
        }
    }

    #[test]
    fn spans_partition_the_circuit(c in circuit()) {
        let mut next_op = 0;
        let mut next_slot = 0;
        for span in c.segments() {
            prop_assert_eq!(span.ops.start, next_op);
            prop_assert_eq!(span.parameters.start, next_slot);
            next_op = span.ops.end;
            next_slot = span.parameters.end;
        }
        prop_assert_eq!(next_op, c.len());
        prop_assert_eq!(next_slot, c.num_parameters());
    }
}
