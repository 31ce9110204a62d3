//! Error types for composition.

use qcompose_ansatz::AnsatzError;
use qcompose_ir::{IrError, SegmentKind};
use qcompose_sim::SimError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors raised while composing, binding or executing a circuit.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ComposeError {
    /// A segment was built against a register of a different size.
    #[error("Segment {segment} was built for {got} qubits but the session register has {expected}")]
    QubitRegisterMismatch {
        /// Position of the segment in the session.
        segment: usize,
        /// Session register size.
        expected: u32,
        /// The segment's register size.
        got: u32,
    },

    /// An earlier call failed; the session accepts no further segments.
    #[error("Composition session was aborted by an earlier error")]
    SessionAborted,

    /// An encoder or ansatz descriptor could not be instantiated.
    #[error("Segment {segment} ({kind}): {source}")]
    Ansatz {
        /// Position of the segment in the session.
        segment: usize,
        /// Encoder or ansatz.
        kind: SegmentKind,
        /// Underlying failure.
        #[source]
        source: AnsatzError,
    },

    /// A Trotter descriptor could not be decomposed.
    #[error("Segment {segment} (trotter): {source}")]
    Trotter {
        /// Position of the segment in the session.
        segment: usize,
        /// Underlying failure.
        #[source]
        source: SimError,
    },

    /// A pushed segment violates a qubit or slot invariant.
    #[error("Segment {segment} ({kind}) is malformed: {source}")]
    InvalidSegment {
        /// Position of the segment in the session.
        segment: usize,
        /// Kind of the segment.
        kind: SegmentKind,
        /// Underlying failure.
        #[source]
        source: IrError,
    },

    /// A value buffer does not match the parameter vector length.
    #[error("Expected {expected} parameter values, got {got}")]
    ParameterCountMismatch {
        /// Parameter vector length.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// An execution backend failed.
    #[error("Backend '{backend}' failed: {message}")]
    Backend {
        /// Backend name.
        backend: String,
        /// Failure description.
        message: String,
    },
}

/// Result type for composition operations.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Flat error taxonomy, independent of which layer raised the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Feature vector length differs from the register size.
    DimensionMismatch,
    /// Template depth below one, or a layer range past `usize::MAX`.
    InvalidDepth,
    /// Register violates a template's structural requirement.
    QubitCountMismatch,
    /// Hamiltonian without terms.
    EmptyHamiltonian,
    /// Hamiltonian term with a complex coefficient.
    NonHermitianTerm,
    /// Segment register differs from the session register.
    QubitRegisterMismatch,
    /// Trotter step count of zero.
    InvalidSteps,
    /// Qubit outside the register.
    QubitOutOfRange,
    /// Same qubit used twice in one operation.
    DuplicateQubit,
    /// Value buffer of the wrong length.
    ParameterCountMismatch,
    /// Angle referencing a slot that does not exist.
    UnknownParameter,
    /// Call on an aborted session.
    SessionAborted,
    /// Execution backend failure.
    Backend,
    /// Anything else.
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl ComposeError {
    /// Index of the segment the error refers to, if any.
    pub fn segment(&self) -> Option<usize> {
        match self {
            ComposeError::QubitRegisterMismatch { segment, .. }
            | ComposeError::Ansatz { segment, .. }
            | ComposeError::Trotter { segment, .. }
            | ComposeError::InvalidSegment { segment, .. } => Some(*segment),
            _ => None,
        }
    }

    /// The flat error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ComposeError::QubitRegisterMismatch { .. } => ErrorKind::QubitRegisterMismatch,
            ComposeError::SessionAborted => ErrorKind::SessionAborted,
            ComposeError::Ansatz { source, .. } => ansatz_kind(source),
            ComposeError::Trotter { source, .. } => sim_kind(source),
            ComposeError::InvalidSegment { source, .. } => ir_kind(source),
            ComposeError::ParameterCountMismatch { .. } => ErrorKind::ParameterCountMismatch,
            ComposeError::Backend { .. } => ErrorKind::Backend,
        }
    }
}

fn ir_kind(err: &IrError) -> ErrorKind {
    match err {
        IrError::QubitOutOfRange { .. } => ErrorKind::QubitOutOfRange,
        IrError::DuplicateQubit { .. } => ErrorKind::DuplicateQubit,
        IrError::UnknownParameter { .. } => ErrorKind::UnknownParameter,
        IrError::ParameterCountMismatch { .. } => ErrorKind::ParameterCountMismatch,
        _ => ErrorKind::Other,
    }
}

fn sim_kind(err: &SimError) -> ErrorKind {
    match err {
        SimError::EmptyHamiltonian => ErrorKind::EmptyHamiltonian,
        SimError::NonHermitianTerm { .. } => ErrorKind::NonHermitianTerm,
        SimError::QubitOutOfRange { .. } => ErrorKind::QubitOutOfRange,
        SimError::InvalidSteps(_) => ErrorKind::InvalidSteps,
        SimError::Ir(inner) => ir_kind(inner),
        _ => ErrorKind::Other,
    }
}

fn ansatz_kind(err: &AnsatzError) -> ErrorKind {
    match err {
        AnsatzError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
        AnsatzError::InvalidDepth(_) | AnsatzError::InvalidStartLayer { .. } => {
            ErrorKind::InvalidDepth
        }
        AnsatzError::QubitCountMismatch { .. } => ErrorKind::QubitCountMismatch,
        AnsatzError::ParameterCountMismatch { .. } => ErrorKind::ParameterCountMismatch,
        AnsatzError::Ir(inner) => ir_kind(inner),
        AnsatzError::Sim(inner) => sim_kind(inner),
        _ => ErrorKind::Other,
    }
}
