//! Pauli-string exponentiation.
//!
//! Implements the standard gate synthesis for
//!
//!   exp(-i · θ/2 · P)
//!
//! where P is a tensor product of Pauli operators. A weight-one string is a
//! single rotation `R_P(θ)`. Heavier strings use the circuit identity
//!
//!   exp(-i θ/2 · Z⊗Z⊗...⊗Z) = CNOT_ladder · Rz(θ) · CNOT_ladder†
//!
//! with basis rotations applied before/after to handle X and Y factors:
//!   X → H · Z · H
//!   Y → Sdg · H · Z · H · S
//!   Z → identity
//!
//! Gate count per multi-qubit term: 2·(k-1) CX + basis gates + 1 Rz,
//! where k = number of non-identity qubits.

use qcompose_ir::{Axis, ParameterExpression, QubitId, SegmentBuilder};

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{PauliOp, PauliString};

/// Append the gates for `exp(-i · θ/2 · P)` to `builder`.
///
/// `theta` follows the rotation-gate convention, so a Hamiltonian term
/// `c · P` evolved for time `τ` uses `θ = 2 · c · τ`. The angle may reference
/// parameter slots already allocated on the builder.
///
/// If the Pauli string is the identity operator the function is a no-op
/// (global phase, unobservable).
pub fn append_exp_pauli(
    builder: &mut SegmentBuilder,
    pauli: &PauliString,
    theta: ParameterExpression,
) -> SimResult<()> {
    let ops = pauli.ops();
    let n_qubits = builder.register().len();

    for &(q, _) in ops {
        if q >= n_qubits {
            return Err(SimError::QubitOutOfRange { qubit: q, n_qubits });
        }
    }

    match ops {
        [] => Ok(()),
        [(q, op)] => {
            let axis = match op {
                PauliOp::X => Axis::X,
                PauliOp::Y => Axis::Y,
                PauliOp::Z | PauliOp::I => Axis::Z,
            };
            builder.rotation(axis, theta, QubitId(*q))?;
            Ok(())
        }
        [.., (last, _)] => {
            basis_change(builder, ops, false)?;

            let qubits: Vec<u32> = ops.iter().map(|(q, _)| *q).collect();
            cnot_ladder(builder, &qubits)?;
            builder.rz(theta, QubitId(*last))?;
            cnot_ladder_reverse(builder, &qubits)?;

            basis_change(builder, ops, true)?;
            Ok(())
        }
    }
}

/// Number of gate operations [`append_exp_pauli`] emits for `pauli`.
pub fn exp_pauli_gate_count(pauli: &PauliString) -> usize {
    let ops = pauli.ops();
    match ops.len() {
        0 => 0,
        1 => 1,
        k => {
            let basis: usize = ops
                .iter()
                .map(|(_, op)| match op {
                    PauliOp::X => 2,
                    PauliOp::Y => 4,
                    PauliOp::Z | PauliOp::I => 0,
                })
                .sum();
            2 * (k - 1) + 1 + basis
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Apply basis-change gates for each Pauli operator.
///
/// For the forward pass (`undo = false`):
///   X → H
///   Y → Sdg · H
///   Z → (nothing)
///
/// For the reverse pass (`undo = true`):
///   X → H  (H is self-inverse)
///   Y → H · S
///   Z → (nothing)
fn basis_change(
    builder: &mut SegmentBuilder,
    ops: &[(u32, PauliOp)],
    undo: bool,
) -> SimResult<()> {
    for &(q, op) in ops {
        let qid = QubitId(q);
        match (op, undo) {
            (PauliOp::X, _) => {
                builder.h(qid)?;
            }
            (PauliOp::Y, false) => {
                builder.sdg(qid)?;
                builder.h(qid)?;
            }
            (PauliOp::Y, true) => {
                builder.h(qid)?;
                builder.s(qid)?;
            }
            (PauliOp::Z | PauliOp::I, _) => {}
        }
    }
    Ok(())
}

/// Apply a forward CNOT ladder: CX(q[0],q[1]), CX(q[1],q[2]), …, CX(q[k-2], q[k-1]).
///
/// Collects the parity of all qubits onto the last one, so a single Rz
/// implements the tensor-product rotation.
fn cnot_ladder(builder: &mut SegmentBuilder, qubits: &[u32]) -> SimResult<()> {
    for window in qubits.windows(2) {
        builder.cx(QubitId(window[0]), QubitId(window[1]))?;
    }
    Ok(())
}

/// Undo [`cnot_ladder`] by running the same gates in reverse order.
fn cnot_ladder_reverse(builder: &mut SegmentBuilder, qubits: &[u32]) -> SimResult<()> {
    for window in qubits.windows(2).rev() {
        builder.cx(QubitId(window[0]), QubitId(window[1]))?;
    }
    Ok(())
}
