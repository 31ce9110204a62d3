//! Unary-encoding ansatz: a single excitation on qubit 0, spread along the
//! register by controlled partial swaps `CX(i+1, i) · CRy(θ) · CX(i+1, i)`.

use std::ops::Range;

use qcompose_ir::{QubitId, SegmentBuilder};

use super::Slots;
use crate::error::AnsatzResult;

pub(super) fn check(n_qubits: u32) -> Option<&'static str> {
    (n_qubits < 2).then_some("needs at least 2 qubits")
}

pub(super) fn num_parameters(n_qubits: u32, layers: Range<usize>) -> usize {
    layers.len() * n_qubits.saturating_sub(1) as usize
}

pub(super) fn build(b: &mut SegmentBuilder, slots: &Slots<'_>, layers: Range<usize>) -> AnsatzResult<()> {
    let n = b.register().len();
    if layers.start == 0 {
        b.x(QubitId(0))?;
    }
    for _ in layers {
        for i in 0..n - 1 {
            let (a, c) = (QubitId(i), QubitId(i + 1));
            let theta = slots.theta(b);
            b.cx(c, a)?;
            b.cry(theta, a, c)?;
            b.cx(c, a)?;
        }
    }
    Ok(())
}
