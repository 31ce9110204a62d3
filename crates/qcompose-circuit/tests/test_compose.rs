//! End-to-end composition tests.

use qcompose_ansatz::AnsatzTemplate;
use qcompose_circuit::spec::{AnsatzBlock, TrotterBlock};
use qcompose_circuit::{
    ComposeError, Composer, ErrorKind, ExecutionBackend, Placement, ReferenceBackend,
    SegmentSpec, compose,
};
use qcompose_ir::{Axis, GateCategory, ParameterExpression, QubitRegister, SegmentKind};
use qcompose_sim::{Hamiltonian, HamiltonianTerm, TrotterOrder};

fn zz() -> Hamiltonian {
    Hamiltonian::from_terms(vec![HamiltonianTerm::zz(0, 1, 1.0)])
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn butterfly_depth_two_on_four_qubits() {
    let circuit = compose(
        QubitRegister::new(4),
        &[SegmentSpec::ansatz(AnsatzTemplate::ButterflyOrthogonal, 2)],
    )
    .unwrap();
    assert_eq!(circuit.num_parameters(), 8);
    assert_eq!(circuit.len(), 14);
    assert_eq!(circuit.entangler_count(), 6);
    assert_eq!(circuit.category_counts()[&GateCategory::Rotation], 8);
    assert_eq!(circuit.gate_counts()["cx"], 6);
}

#[test]
fn zz_trotter_two_steps() {
    let circuit = compose(
        QubitRegister::new(2),
        &[SegmentSpec::trotter(zz(), 1.0, 2)],
    )
    .unwrap();
    let names: Vec<_> = circuit.gate_ops().map(|op| op.name()).collect();
    assert_eq!(names, vec!["cx", "rz", "cx", "cx", "rz", "cx"]);
    for op in circuit.gate_ops().filter(|op| op.name() == "rz") {
        let angle = op.angle().and_then(ParameterExpression::as_f64).unwrap();
        assert!((angle - 1.0).abs() < 1e-12);
    }
    assert_eq!(circuit.num_parameters(), 0);
}

#[test]
fn short_feature_vector() {
    let err = compose(
        QubitRegister::new(4),
        &[SegmentSpec::encoder(Axis::Y, vec![0.1, 0.2, 0.3])],
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    assert_eq!(err.segment(), Some(0));
}

// ---------------------------------------------------------------------------
// Composition laws
// ---------------------------------------------------------------------------

#[test]
fn composing_equals_appending() {
    let register = QubitRegister::new(4);
    let encoder = SegmentSpec::encoder(Axis::Z, vec![0.5, 0.25, 0.125, 1.0]);
    let ansatz = SegmentSpec::ansatz(AnsatzTemplate::CrossOrthogonal, 2);

    let together = compose(register, &[encoder.clone(), ansatz.clone()]).unwrap();
    let apart = compose(register, &[encoder])
        .unwrap()
        .then(&compose(register, &[ansatz]).unwrap())
        .unwrap();
    assert_eq!(together, apart);
}

#[test]
fn invalid_input_fails_the_same_way_twice() {
    let specs = [
        SegmentSpec::ansatz(AnsatzTemplate::Brickwork, 1),
        SegmentSpec::trotter(Hamiltonian::from_terms(vec![]), 1.0, 1),
    ];
    let first = compose(QubitRegister::new(3), &specs).unwrap_err();
    let second = compose(QubitRegister::new(3), &specs).unwrap_err();
    assert_eq!(first.kind(), ErrorKind::EmptyHamiltonian);
    assert_eq!(first.kind(), second.kind());
    assert_eq!(first, second);
}

#[test]
fn error_kinds_for_each_component() {
    let cases = [
        (SegmentSpec::ansatz(AnsatzTemplate::Unary, 0), ErrorKind::InvalidDepth),
        (
            SegmentSpec::ansatz(AnsatzTemplate::ButterflyOrthogonal, 1),
            ErrorKind::QubitCountMismatch,
        ),
        (SegmentSpec::trotter(zz(), 1.0, 0), ErrorKind::InvalidSteps),
        (
            SegmentSpec::trotter(
                Hamiltonian::from_terms(vec![HamiltonianTerm::z(7, 1.0)]),
                1.0,
                1,
            ),
            ErrorKind::QubitOutOfRange,
        ),
        (
            SegmentSpec::trotter(
                serde_yaml_ng::from_str("- coeff: [1.0, 0.5]\n  pauli: [[0, Z]]\n").unwrap(),
                1.0,
                1,
            ),
            ErrorKind::NonHermitianTerm,
        ),
    ];
    for (spec, kind) in cases {
        let err = compose(QubitRegister::new(3), &[spec]).unwrap_err();
        assert_eq!(err.kind(), kind, "{err}");
    }
}

#[test]
fn then_rejects_other_register() {
    let a = compose(QubitRegister::new(2), &[]).unwrap();
    let b = compose(QubitRegister::new(3), &[]).unwrap();
    assert!(matches!(
        a.then(&b),
        Err(ComposeError::QubitRegisterMismatch { expected: 2, got: 3, .. })
    ));
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

#[test]
fn interleaved_inserts_trotter_after_each_layer() {
    let ansatz = AnsatzBlock::new(AnsatzTemplate::ButterflyOrthogonal, 3);
    let trotter = TrotterBlock::new(zz(), 1.0, 2);
    let specs = Placement::Interleaved.arrange(&ansatz, &trotter, 4);
    let circuit = compose(QubitRegister::new(4), &specs).unwrap();

    let kinds: Vec<_> = circuit.segments().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SegmentKind::Ansatz,
            SegmentKind::Trotter,
            SegmentKind::Ansatz,
            SegmentKind::Trotter,
            SegmentKind::Ansatz,
            SegmentKind::Trotter
        ]
    );
    assert_eq!(circuit.num_parameters(), 12);
    // 3 × (4 Ry + 3 CX) + 3 × 2 × (CX, Rz, CX)
    assert_eq!(circuit.len(), 21 + 18);
}

#[test]
fn placements_hold_the_same_gates() {
    let ansatz = AnsatzBlock::new(AnsatzTemplate::ButterflyOrthogonal, 2);
    let trotter = TrotterBlock::new(zz(), 1.0, 1);
    let register = QubitRegister::new(4);
    let before = compose(register, &Placement::Before.arrange(&ansatz, &trotter, 4)).unwrap();
    let after = compose(register, &Placement::After.arrange(&ansatz, &trotter, 4)).unwrap();
    assert_eq!(before.len(), after.len());
    assert_eq!(before.num_parameters(), after.num_parameters());
    assert_eq!(before.segments()[0].kind, SegmentKind::Trotter);
    assert_eq!(after.segments()[0].kind, SegmentKind::Ansatz);
}

// ---------------------------------------------------------------------------
// Binding and execution
// ---------------------------------------------------------------------------

#[test]
fn bind_substitutes_every_slot() {
    let mut trotter = TrotterBlock::new(zz(), 1.0, 2);
    trotter.trainable_time = true;
    trotter.order = TrotterOrder::Second;
    let circuit = compose(
        QubitRegister::new(2),
        &[
            SegmentSpec::encoder(Axis::Y, vec![0.3, 0.7]),
            SegmentSpec::Trotter(trotter),
        ],
    )
    .unwrap();
    assert_eq!(circuit.parameters().names(), vec!["x[0]", "x[1]", "t"]);
    assert_eq!(circuit.parameters().get(2).map(|e| e.segment), Some(1));

    let bound = circuit.bind(&[0.3, 0.7, 1.0]).unwrap();
    assert!(bound.iter().all(|op| !op.is_parameterized()));
    assert_eq!(bound, circuit.bound_default().unwrap());

    assert_eq!(
        circuit.bind(&[0.0]).unwrap_err(),
        ComposeError::ParameterCountMismatch {
            expected: 3,
            got: 1
        }
    );
}

#[test]
fn reference_backend_runs_composed_circuit() {
    // Ry(π) on both qubits, then exp(-i ZZ t) only adds a phase.
    let circuit = compose(
        QubitRegister::new(2),
        &[
            SegmentSpec::encoder(Axis::Y, vec![1.0, 1.0]),
            SegmentSpec::trotter(zz(), 0.8, 3),
        ],
    )
    .unwrap();
    let outcome = ReferenceBackend
        .execute(&circuit, &circuit.parameters().values())
        .unwrap();
    assert!((outcome.probabilities[0b11] - 1.0).abs() < 1e-10);
}

#[test]
fn session_survives_only_until_first_error() {
    let mut composer = Composer::new(QubitRegister::new(2));
    composer
        .push_spec(&SegmentSpec::ansatz(AnsatzTemplate::Qaoa, 1))
        .unwrap();
    let err = composer
        .push_spec(&SegmentSpec::ansatz(AnsatzTemplate::Qcn, 2))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::QubitCountMismatch);
    assert_eq!(err.segment(), Some(1));
    assert_eq!(
        composer
            .push_spec(&SegmentSpec::ansatz(AnsatzTemplate::Qaoa, 1))
            .unwrap_err()
            .kind(),
        ErrorKind::SessionAborted
    );
}
