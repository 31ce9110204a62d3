//! Brickwork: alternating nearest-neighbour RBS layers.
//!
//! Even layers couple `(0,1), (2,3), …`; odd layers couple `(1,2), (3,4), …`.

use std::ops::Range;

use qcompose_ir::{QubitId, SegmentBuilder};

use super::Slots;
use crate::error::AnsatzResult;

pub(super) fn check(n_qubits: u32) -> Option<&'static str> {
    (n_qubits < 2).then_some("needs at least 2 qubits")
}

fn pairs(n_qubits: u32, layer: usize) -> impl Iterator<Item = (u32, u32)> {
    let first = (layer % 2) as u32;
    (first..n_qubits.saturating_sub(1))
        .step_by(2)
        .map(|i| (i, i + 1))
}

pub(super) fn num_parameters(n_qubits: u32, layers: Range<usize>) -> usize {
    layers.map(|l| pairs(n_qubits, l).count()).sum()
}

pub(super) fn build(b: &mut SegmentBuilder, slots: &Slots<'_>, layers: Range<usize>) -> AnsatzResult<()> {
    let n = b.register().len();
    for layer in layers {
        for (q0, q1) in pairs(n, layer) {
            let theta = slots.theta(b);
            b.rbs(theta, QubitId(q0), QubitId(q1))?;
        }
    }
    Ok(())
}
