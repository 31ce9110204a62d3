//! QAOA-style layers on a nearest-neighbour ZZ cost.
//!
//! Layer `l` shares one cost angle `γ[l]` across every `exp(−i γ Z_i Z_{i+1})`
//! and one mixer angle `β[l]` across every `Rx(2β)`. The cost terms are
//! synthesised the same way as Hamiltonian terms.

use std::ops::Range;

use qcompose_ir::{ParameterExpression, QubitId, SegmentBuilder};
use qcompose_sim::hamiltonian::PauliString;
use qcompose_sim::synthesis::append_exp_pauli;

use super::Slots;
use crate::error::AnsatzResult;

pub(super) fn check(n_qubits: u32) -> Option<&'static str> {
    (n_qubits < 2).then_some("needs at least 2 qubits")
}

pub(super) fn num_parameters(layers: Range<usize>) -> usize {
    2 * layers.len()
}

pub(super) fn build(b: &mut SegmentBuilder, slots: &Slots<'_>, layers: Range<usize>) -> AnsatzResult<()> {
    let n = b.register().len();
    if layers.start == 0 {
        for q in 0..n {
            b.h(QubitId(q))?;
        }
    }

    for layer in layers {
        let gamma = slots.named(b, format!("γ[{layer}]"));
        for i in 0..n - 1 {
            let angle = ParameterExpression::constant(2.0) * gamma.clone();
            append_exp_pauli(b, &PauliString::zz([i, i + 1]), angle)?;
        }

        let beta = slots.named(b, format!("β[{layer}]"));
        for q in 0..n {
            b.rx(ParameterExpression::constant(2.0) * beta.clone(), QubitId(q))?;
        }
    }
    Ok(())
}
