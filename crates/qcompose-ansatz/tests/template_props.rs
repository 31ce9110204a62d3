//! Property tests: slot-count law and register bounds for every template.

use proptest::prelude::*;
use qcompose_ansatz::{AnsatzSpec, AnsatzTemplate};
use qcompose_ir::QubitRegister;

fn template() -> impl Strategy<Value = AnsatzTemplate> {
    proptest::sample::select(AnsatzTemplate::ALL.to_vec())
}

proptest! {
    #[test]
    fn declared_slots_equal_consumed(t in template(), n in 1u32..=9, depth in 1usize..=4) {
        let spec = AnsatzSpec::new(t, depth);
        if let Ok(declared) = spec.num_parameters(n) {
            let seg = spec.build(QubitRegister::new(n), None).unwrap();
            prop_assert_eq!(seg.num_parameters(), declared);
        }
    }

    #[test]
    fn ops_stay_inside_register(t in template(), n in 1u32..=9, depth in 1usize..=4) {
        let spec = AnsatzSpec::new(t, depth);
        if let Ok(seg) = spec.build(QubitRegister::new(n), None) {
            prop_assert!(seg.validate().is_ok());
            for op in seg.ops() {
                for q in op.qubits() {
                    prop_assert!(q.0 < n);
                }
            }
        }
    }

    #[test]
    fn initial_values_round_trip(t in template(), depth in 1usize..=2, seed in 0.0f64..1.0) {
        let spec = AnsatzSpec::new(t, depth);
        let count = spec.num_parameters(4).unwrap();
        let initial: Vec<f64> = (0..count).map(|k| seed + k as f64).collect();
        let seg = spec.build(QubitRegister::new(4), Some(&initial)).unwrap();
        let values: Vec<f64> = seg.parameters().iter().map(|p| p.value).collect();
        prop_assert_eq!(values, initial);
    }
}
