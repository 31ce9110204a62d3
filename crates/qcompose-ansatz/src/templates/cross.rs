//! Cross orthogonal layers: RBS on mirrored pairs `(i, N−1−i)`, then on
//! neighbours `(i, i+1)`.

use std::ops::Range;

use qcompose_ir::{QubitId, SegmentBuilder};

use super::Slots;
use crate::error::AnsatzResult;

pub(super) fn check(n_qubits: u32) -> Option<&'static str> {
    (n_qubits < 2).then_some("needs at least 2 qubits")
}

pub(super) fn num_parameters(n_qubits: u32, layers: Range<usize>) -> usize {
    let n = n_qubits as usize;
    layers.len() * (n / 2 + n.saturating_sub(1))
}

pub(super) fn build(b: &mut SegmentBuilder, slots: &Slots<'_>, layers: Range<usize>) -> AnsatzResult<()> {
    let n = b.register().len();
    for _ in layers {
        for i in 0..n / 2 {
            let theta = slots.theta(b);
            b.rbs(theta, QubitId(i), QubitId(n - 1 - i))?;
        }
        for i in 0..n - 1 {
            let theta = slots.theta(b);
            b.rbs(theta, QubitId(i), QubitId(i + 1))?;
        }
    }
    Ok(())
}
