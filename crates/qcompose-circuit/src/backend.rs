//! Execution seam.
//!
//! Execution is owned by an external collaborator. [`ExecutionBackend`] is
//! the boundary: it receives a composed circuit and a full parameter buffer
//! and returns whatever the backend measures. [`ReferenceBackend`] runs the
//! dense statevector simulator and is meant for tests and small demos.

use qcompose_ir::QubitId;
use qcompose_sim::reference::{MAX_QUBITS, Statevector};
use serde::Serialize;
use tracing::debug;

use crate::circuit::ComposedCircuit;
use crate::error::{ComposeError, ComposeResult};

/// A circuit executor.
pub trait ExecutionBackend: Send + Sync {
    /// What one execution produces.
    type Output;

    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Run `circuit` with every slot bound from `values`.
    fn execute(&self, circuit: &ComposedCircuit, values: &[f64]) -> ComposeResult<Self::Output>;
}

/// Exact measurement statistics from the reference simulator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceOutcome {
    /// Probability of each basis state, qubit `q` being bit `q`.
    pub probabilities: Vec<f64>,
    /// ⟨Z⟩ per qubit.
    pub expectations: Vec<f64>,
}

/// Dense statevector backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceBackend;

impl ReferenceBackend {
    /// Widest circuit this backend accepts.
    pub const MAX_QUBITS: u32 = MAX_QUBITS;
}

impl ExecutionBackend for ReferenceBackend {
    type Output = ReferenceOutcome;

    fn name(&self) -> &str {
        "reference"
    }

    fn execute(&self, circuit: &ComposedCircuit, values: &[f64]) -> ComposeResult<ReferenceOutcome> {
        let ops = circuit.bind(values)?;
        let fail = |e: qcompose_sim::SimError| ComposeError::Backend {
            backend: self.name().to_owned(),
            message: e.to_string(),
        };

        let mut state = Statevector::zero(circuit.num_qubits()).map_err(fail)?;
        state.apply_all(&ops, &[]).map_err(fail)?;

        debug!(
            n_qubits = circuit.num_qubits(),
            n_ops = ops.len(),
            "reference execution complete"
        );
        Ok(ReferenceOutcome {
            probabilities: state.probabilities(),
            expectations: circuit
                .register()
                .qubits()
                .map(|q: QubitId| state.expectation_z(q))
                .collect(),
        })
    }
}
