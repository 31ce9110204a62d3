//! Butterfly orthogonal layers.
//!
//! Each layer applies `Ry(θ)` on every qubit followed by log₂N butterfly
//! stages. Stage `k` couples qubits `2^k` apart: `CX(i, i + 2^k)` for
//! `i = 0, 2^{k+1}, 2·2^{k+1}, …`. A layer therefore holds N rotations and
//! N − 1 entanglers.

use std::ops::Range;

use qcompose_ir::{QubitId, SegmentBuilder};

use super::Slots;
use crate::error::AnsatzResult;

pub(super) fn check(n_qubits: u32) -> Option<&'static str> {
    (n_qubits < 2 || !n_qubits.is_power_of_two())
        .then_some("needs a power-of-two register of at least 2 qubits")
}

pub(super) fn num_parameters(n_qubits: u32, layers: Range<usize>) -> usize {
    layers.len() * n_qubits as usize
}

pub(super) fn build(b: &mut SegmentBuilder, slots: &Slots<'_>, layers: Range<usize>) -> AnsatzResult<()> {
    let n = b.register().len();
    for _ in layers {
        for q in 0..n {
            let theta = slots.theta(b);
            b.ry(theta, QubitId(q))?;
        }

        let mut stride = 1;
        while stride < n {
            for i in (0..n - stride).step_by(2 * stride as usize) {
                b.cx(QubitId(i), QubitId(i + stride))?;
            }
            stride *= 2;
        }
    }
    Ok(())
}
