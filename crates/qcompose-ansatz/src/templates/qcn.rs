//! Quantum convolutional network.
//!
//! Each level pairs the active qubits `(a₀, a₁), (a₂, a₃), …`. A pair gets a
//! convolution (`Ry` on both, `CX(a₀, a₁)`) and a pooling step that folds
//! `a₁` into `a₀` (`CRz`, `X(a₁)`, `CRx`, both controlled by `a₁`). The
//! pooled qubit leaves the active set, so the active count halves (rounding
//! up) at every level.

use std::ops::Range;

use qcompose_ir::{QubitId, SegmentBuilder};

use super::Slots;
use crate::error::AnsatzResult;

const SLOTS_PER_PAIR: usize = 4;

/// Active qubits at the start of `level`.
fn active_at(n_qubits: u32, level: usize) -> Vec<u32> {
    let mut active: Vec<u32> = (0..n_qubits).collect();
    for _ in 0..level {
        if active.len() <= 1 {
            break;
        }
        active = active.into_iter().step_by(2).collect();
    }
    active
}

pub(super) fn check(n_qubits: u32, layers: &Range<usize>) -> Option<&'static str> {
    let last = layers.end.checked_sub(1)?;
    (active_at(n_qubits, last).len() < 2).then_some("needs at least 2 active qubits at every level")
}

pub(super) fn num_parameters(n_qubits: u32, layers: Range<usize>) -> usize {
    layers
        .map(|l| SLOTS_PER_PAIR * (active_at(n_qubits, l).len() / 2))
        .sum()
}

pub(super) fn build(b: &mut SegmentBuilder, slots: &Slots<'_>, layers: Range<usize>) -> AnsatzResult<()> {
    let n = b.register().len();
    for level in layers {
        let active = active_at(n, level);
        for pair in active.chunks_exact(2) {
            let (keep, pooled) = (QubitId(pair[0]), QubitId(pair[1]));

            let theta = slots.theta(b);
            b.ry(theta, keep)?;
            let theta = slots.theta(b);
            b.ry(theta, pooled)?;
            b.cx(keep, pooled)?;

            let phi = slots.theta(b);
            b.crz(phi, pooled, keep)?;
            b.x(pooled)?;
            let phi = slots.theta(b);
            b.crx(phi, pooled, keep)?;
        }
    }
    Ok(())
}
