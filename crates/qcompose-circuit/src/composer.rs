//! Composition sessions.
//!
//! A [`Composer`] appends segments to a fixed register, re-indexing each
//! segment's local slots into one shared parameter vector. Segments are only
//! ever appended; there is no removal or reordering, so placement is entirely
//! the caller's push order.
//!
//! ```text
//!   Empty ──push──→ Accumulating ──finalize──→ ComposedCircuit
//!     │                  │
//!     └──── error ───────┴──→ Aborted (every later call: SessionAborted)
//! ```

use qcompose_ir::{QubitRegister, Segment};
use tracing::{debug, trace, warn};

use crate::circuit::{
    ComposedCircuit, ComposedOp, ParameterEntry, ParameterVector, Provenance, SegmentSpan,
};
use crate::error::{ComposeError, ComposeResult};
use crate::spec::SegmentSpec;

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No segment pushed yet.
    Empty,
    /// At least one segment pushed.
    Accumulating,
    /// A call failed; the session is unusable.
    Aborted,
}

/// An in-progress composition.
#[derive(Debug, Clone)]
pub struct Composer {
    register: QubitRegister,
    state: SessionState,
    ops: Vec<ComposedOp>,
    parameters: ParameterVector,
    segments: Vec<SegmentSpan>,
}

impl Composer {
    /// Start an empty session on `register`.
    pub fn new(register: QubitRegister) -> Self {
        Self {
            register,
            state: SessionState::Empty,
            ops: vec![],
            parameters: ParameterVector::default(),
            segments: vec![],
        }
    }

    /// The session register.
    pub fn register(&self) -> QubitRegister {
        self.register
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Segments appended so far.
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Current length of the parameter vector.
    pub fn num_parameters(&self) -> usize {
        self.parameters.len()
    }

    /// Append a built segment.
    ///
    /// The segment must have been built against a register of the session's
    /// size, and every operation is re-checked against its own slot table
    /// before anything is appended.
    pub fn push(&mut self, segment: Segment) -> ComposeResult<&mut Self> {
        self.ensure_open()?;
        let index = self.segments.len();

        if segment.register().len() != self.register.len() {
            return Err(self.abort(ComposeError::QubitRegisterMismatch {
                segment: index,
                expected: self.register.len(),
                got: segment.register().len(),
            }));
        }
        if let Err(source) = segment.validate() {
            return Err(self.abort(ComposeError::InvalidSegment {
                segment: index,
                kind: segment.kind(),
                source,
            }));
        }

        let offset = self.parameters.len();
        let first_op = self.ops.len();
        let provenance = Provenance {
            segment: index,
            kind: segment.kind(),
        };

        for slot in segment.parameters() {
            self.parameters.push(ParameterEntry {
                name: slot.name.clone(),
                value: slot.value,
                segment: index,
            });
        }
        self.ops.extend(segment.ops().iter().map(|op| ComposedOp {
            op: op.shifted(offset),
            provenance,
        }));
        self.segments.push(SegmentSpan {
            kind: segment.kind(),
            label: segment.label().to_owned(),
            ops: first_op..self.ops.len(),
            parameters: offset..self.parameters.len(),
        });
        self.state = SessionState::Accumulating;

        trace!(
            segment = index,
            kind = %segment.kind(),
            label = segment.label(),
            slot_offset = offset,
            n_ops = segment.len(),
            n_params = segment.num_parameters(),
            "pushed segment"
        );
        Ok(self)
    }

    /// Build `spec` on the session register and append it.
    pub fn push_spec(&mut self, spec: &SegmentSpec) -> ComposeResult<&mut Self> {
        self.ensure_open()?;
        match spec.build(self.segments.len(), self.register) {
            Ok(segment) => self.push(segment),
            Err(err) => Err(self.abort(err)),
        }
    }

    /// Freeze the session into a circuit.
    ///
    /// An empty session yields an empty circuit.
    pub fn finalize(self) -> ComposeResult<ComposedCircuit> {
        if self.state == SessionState::Aborted {
            warn!("finalize called on aborted composition session");
            return Err(ComposeError::SessionAborted);
        }
        debug!(
            n_qubits = self.register.len(),
            n_segments = self.segments.len(),
            n_ops = self.ops.len(),
            n_params = self.parameters.len(),
            "composition finalized"
        );
        Ok(ComposedCircuit::from_parts(
            self.register,
            self.ops,
            self.parameters,
            self.segments,
        ))
    }

    fn ensure_open(&self) -> ComposeResult<()> {
        if self.state == SessionState::Aborted {
            warn!("push on aborted composition session");
            return Err(ComposeError::SessionAborted);
        }
        Ok(())
    }

    fn abort(&mut self, err: ComposeError) -> ComposeError {
        warn!(error = %err, "composition session aborted");
        self.state = SessionState::Aborted;
        err
    }
}

/// Build and append every descriptor in order, stopping at the first failure.
pub fn compose(register: QubitRegister, specs: &[SegmentSpec]) -> ComposeResult<ComposedCircuit> {
    let mut composer = Composer::new(register);
    for spec in specs {
        composer.push_spec(spec)?;
    }
    composer.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcompose_ansatz::AnsatzTemplate;
    use qcompose_ir::{Axis, QubitId, SegmentBuilder, SegmentKind};

    #[test]
    fn slots_are_reindexed() {
        let mut composer = Composer::new(QubitRegister::new(4));
        composer
            .push_spec(&SegmentSpec::encoder(Axis::Y, vec![0.1, 0.2, 0.3, 0.4]))
            .unwrap()
            .push_spec(&SegmentSpec::ansatz(AnsatzTemplate::ButterflyOrthogonal, 1))
            .unwrap();
        assert_eq!(composer.state(), SessionState::Accumulating);

        let circuit = composer.finalize().unwrap();
        assert_eq!(circuit.num_parameters(), 8);
        let first_ansatz = &circuit.ops()[4];
        assert_eq!(first_ansatz.provenance.kind, SegmentKind::Ansatz);
        assert_eq!(
            first_ansatz
                .op
                .angle()
                .and_then(qcompose_ir::ParameterExpression::max_slot),
            Some(4)
        );
        assert_eq!(circuit.segments()[1].parameters, 4..8);
    }

    #[test]
    fn register_mismatch_aborts() {
        let mut composer = Composer::new(QubitRegister::new(4));
        let mut b = SegmentBuilder::new(SegmentKind::Ansatz, "narrow", QubitRegister::new(2));
        b.h(QubitId(0)).unwrap();
        let err = composer.push(b.build()).unwrap_err();
        assert_eq!(
            err,
            ComposeError::QubitRegisterMismatch {
                segment: 0,
                expected: 4,
                got: 2
            }
        );
        assert_eq!(composer.state(), SessionState::Aborted);

        let ok = SegmentSpec::ansatz(AnsatzTemplate::Brickwork, 1);
        assert_eq!(
            composer.push_spec(&ok).unwrap_err(),
            ComposeError::SessionAborted
        );
        assert_eq!(composer.finalize().unwrap_err(), ComposeError::SessionAborted);
    }

    #[test]
    fn empty_session_finalizes() {
        let circuit = Composer::new(QubitRegister::new(3)).finalize().unwrap();
        assert!(circuit.is_empty());
        assert_eq!(circuit.num_parameters(), 0);
        assert_eq!(circuit.num_qubits(), 3);
    }
}
