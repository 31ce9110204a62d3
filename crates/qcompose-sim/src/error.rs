//! Error types for the sim crate.

use num_complex::Complex64;
use thiserror::Error;

/// Errors produced by Hamiltonian decomposition and reference simulation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Hamiltonian contains no terms.
    #[error("Hamiltonian is empty: no terms to decompose")]
    EmptyHamiltonian,

    /// A term coefficient has a non-zero imaginary part.
    #[error("Term {term_index} has complex coefficient {coeff}; time evolution would not be unitary")]
    NonHermitianTerm {
        /// Position of the term in the Hamiltonian.
        term_index: usize,
        /// The offending coefficient.
        coeff: Complex64,
    },

    /// A Pauli string references a qubit index that is out of range.
    #[error("Pauli string references qubit {qubit} but register only has {n_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits in the target register.
        n_qubits: u32,
    },

    /// n_steps must be ≥ 1.
    #[error("n_steps must be at least 1, got {0}")]
    InvalidSteps(usize),

    /// Pauli label contains a character other than I, X, Y, Z.
    #[error("Invalid Pauli label character '{0}'")]
    InvalidPauliLabel(char),

    /// Dense reference simulation refused a register this wide.
    #[error("Reference simulation supports at most {max} qubits, got {n_qubits}")]
    RegisterTooLarge {
        /// Requested width.
        n_qubits: u32,
        /// Supported maximum.
        max: u32,
    },

    /// Two operators of different dimension were compared.
    #[error("Operator dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Dimension of the first operator.
        left: usize,
        /// Dimension of the second operator.
        right: usize,
    },

    /// Segment builder returned an error.
    #[error("Segment IR error: {0}")]
    Ir(#[from] qcompose_ir::IrError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
