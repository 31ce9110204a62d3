//! Error types for encoders and ansatz templates.

use thiserror::Error;

use crate::templates::AnsatzTemplate;

/// Errors raised while instantiating an encoder or a template.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum AnsatzError {
    /// Feature vector length differs from the register size.
    #[error("Feature vector has {features} entries but register has {n_qubits} qubits")]
    DimensionMismatch {
        /// Number of features supplied.
        features: usize,
        /// Register size.
        n_qubits: u32,
    },

    /// Depth must be at least one layer.
    #[error("Depth must be at least 1, got {0}")]
    InvalidDepth(usize),

    /// The layer range `start_layer..start_layer + depth` overflows.
    #[error("Start layer {start_layer} with depth {depth} exceeds the layer index range")]
    InvalidStartLayer {
        /// First layer index.
        start_layer: usize,
        /// Number of layers.
        depth: usize,
    },

    /// The register violates the template's structural requirement.
    #[error("Template {template} cannot act on {n_qubits} qubits: {requirement}")]
    QubitCountMismatch {
        /// The template.
        template: AnsatzTemplate,
        /// Register size.
        n_qubits: u32,
        /// The violated requirement.
        requirement: &'static str,
    },

    /// Initial parameter values do not match the declared slot count.
    #[error("Template {template} declares {expected} parameters, got {got} initial values")]
    ParameterCountMismatch {
        /// The template.
        template: AnsatzTemplate,
        /// Declared slot count.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// Segment builder returned an error.
    #[error("Segment IR error: {0}")]
    Ir(#[from] qcompose_ir::IrError),

    /// Pauli-exponential synthesis returned an error.
    #[error("Synthesis error: {0}")]
    Sim(#[from] qcompose_sim::SimError),
}

/// Result type for ansatz operations.
pub type AnsatzResult<T> = Result<T, AnsatzError>;
