//! EfficientSU2: full `Rx`, `Ry`, `Rz` rotation blocks separated by a
//! reversed CX chain `CX(N−2, N−1), …, CX(0, 1)`.
//!
//! Layer 0 carries the leading rotation block, so `D` layers hold `D + 1`
//! rotation blocks.

use std::ops::Range;

use qcompose_ir::{Axis, QubitId, SegmentBuilder};

use super::Slots;
use crate::error::AnsatzResult;

const AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

pub(super) fn check(n_qubits: u32) -> Option<&'static str> {
    (n_qubits < 1).then_some("needs at least 1 qubit")
}

pub(super) fn num_parameters(n_qubits: u32, layers: Range<usize>) -> usize {
    let blocks = layers.len() + usize::from(layers.start == 0);
    AXES.len() * n_qubits as usize * blocks
}

fn rotation_block(b: &mut SegmentBuilder, slots: &Slots<'_>) -> AnsatzResult<()> {
    let n = b.register().len();
    for axis in AXES {
        for q in 0..n {
            let theta = slots.theta(b);
            b.rotation(axis, theta, QubitId(q))?;
        }
    }
    Ok(())
}

pub(super) fn build(b: &mut SegmentBuilder, slots: &Slots<'_>, layers: Range<usize>) -> AnsatzResult<()> {
    let n = b.register().len();
    if layers.start == 0 {
        rotation_block(b, slots)?;
    }
    for _ in layers {
        for i in (1..n).rev() {
            b.cx(QubitId(i - 1), QubitId(i))?;
        }
        rotation_block(b, slots)?;
    }
    Ok(())
}
