//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur while building or binding segments.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit lies outside the register.
    #[error("Qubit {qubit} outside register of {num_qubits} qubits{}", format_gate_context(.gate_name))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Size of the register.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Duplicate qubit in a multi-qubit operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Angle references a slot that has not been allocated yet.
    #[error("Parameter slot {slot} referenced but only {allocated} slots allocated{}", format_gate_context(.gate_name))]
    UnknownParameter {
        /// The referenced slot.
        slot: usize,
        /// Number of slots allocated at the time of the reference.
        allocated: usize,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A value buffer does not match the number of slots.
    #[error("Expected {expected} parameter values, got {got}")]
    ParameterCountMismatch {
        /// Number of slots.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
