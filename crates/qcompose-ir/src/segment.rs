//! Segments: contiguous blocks of gate operations with their own slots.
//!
//! Every encoder, ansatz layer and Trotter block is built into a [`Segment`]
//! through a [`SegmentBuilder`]. A segment numbers its parameter slots from
//! zero; the composer re-indexes them when it appends the segment to a
//! circuit.
//!
//! The builder only hands out slot references for slots it has already
//! allocated, and validates every operation on the way in, so a finished
//! segment never references a qubit outside its register or a slot that
//! does not exist yet.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::{Axis, CliffordGate, ControlledKind, EntanglerKind, GateOp};
use crate::parameter::ParameterExpression;
use crate::qubit::{QubitId, QubitRegister};

/// Which component produced a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Feature encoder.
    Encoder,
    /// Variational ansatz layer.
    Ansatz,
    /// Trotterized time evolution.
    Trotter,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Encoder => write!(f, "encoder"),
            SegmentKind::Ansatz => write!(f, "ansatz"),
            SegmentKind::Trotter => write!(f, "trotter"),
        }
    }
}

/// A named parameter slot with its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSlot {
    /// Display name, e.g. `θ[3]`.
    pub name: String,
    /// Current value.
    pub value: f64,
}

/// A finished block of gate operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    kind: SegmentKind,
    label: String,
    register: QubitRegister,
    ops: Vec<GateOp>,
    parameters: Vec<ParameterSlot>,
}

impl Segment {
    /// The component that produced this segment.
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// Human-readable label, e.g. `butterfly_orthogonal`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The register this segment was built against.
    pub fn register(&self) -> QubitRegister {
        self.register
    }

    /// Gate operations in order.
    pub fn ops(&self) -> &[GateOp] {
        &self.ops
    }

    /// Local parameter slots in allocation order.
    pub fn parameters(&self) -> &[ParameterSlot] {
        &self.parameters
    }

    /// Number of local parameter slots.
    pub fn num_parameters(&self) -> usize {
        self.parameters.len()
    }

    /// Number of gate operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True if the segment has no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Re-check every operation against the register and slot table.
    pub fn validate(&self) -> IrResult<()> {
        for op in &self.ops {
            validate_op(op, self.register, self.parameters.len())?;
        }
        Ok(())
    }
}

/// Check a gate operation against a register and a slot count.
pub fn validate_op(op: &GateOp, register: QubitRegister, allocated: usize) -> IrResult<()> {
    let qubits = op.qubits();
    for &q in &qubits {
        register.check(q, Some(op.name()))?;
    }
    if qubits.len() == 2 && qubits[0] == qubits[1] {
        return Err(IrError::DuplicateQubit {
            qubit: qubits[0],
            gate_name: Some(op.name().to_owned()),
        });
    }
    if let Some(slot) = op.angle().and_then(ParameterExpression::max_slot) {
        if slot >= allocated {
            return Err(IrError::UnknownParameter {
                slot,
                allocated,
                gate_name: Some(op.name().to_owned()),
            });
        }
    }
    Ok(())
}

/// Builder for [`Segment`]s.
///
/// Provides a fluent gate API in the same shape as a circuit builder; every
/// gate method validates its operands before appending.
#[derive(Debug, Clone)]
pub struct SegmentBuilder {
    kind: SegmentKind,
    label: String,
    register: QubitRegister,
    ops: Vec<GateOp>,
    parameters: Vec<ParameterSlot>,
}

impl SegmentBuilder {
    /// Start a new segment.
    pub fn new(kind: SegmentKind, label: impl Into<String>, register: QubitRegister) -> Self {
        Self {
            kind,
            label: label.into(),
            register,
            ops: vec![],
            parameters: vec![],
        }
    }

    /// The register the segment is being built against.
    pub fn register(&self) -> QubitRegister {
        self.register
    }

    /// Allocate a new slot and return a reference to it.
    pub fn parameter(&mut self, name: impl Into<String>, value: f64) -> ParameterExpression {
        let index = self.parameters.len();
        self.parameters.push(ParameterSlot {
            name: name.into(),
            value,
        });
        ParameterExpression::slot(index)
    }

    /// Number of slots allocated so far.
    pub fn num_parameters(&self) -> usize {
        self.parameters.len()
    }

    /// Number of operations appended so far.
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Append a validated operation.
    pub fn apply(&mut self, op: GateOp) -> IrResult<&mut Self> {
        validate_op(&op, self.register, self.parameters.len())?;
        self.ops.push(op);
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply a rotation around `axis`.
    pub fn rotation(
        &mut self,
        axis: Axis,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(GateOp::rotation(axis, theta, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.rotation(Axis::X, theta, qubit)
    }

    /// Apply Ry rotation gate.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.rotation(Axis::Y, theta, qubit)
    }

    /// Apply Rz rotation gate.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.rotation(Axis::Z, theta, qubit)
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateOp::clifford(CliffordGate::H, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateOp::clifford(CliffordGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateOp::clifford(CliffordGate::Sdg, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateOp::clifford(CliffordGate::X, qubit))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateOp::entangler(EntanglerKind::CX, control, target))
    }

    /// Apply RBS gate.
    pub fn rbs(
        &mut self,
        theta: impl Into<ParameterExpression>,
        q0: QubitId,
        q1: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(GateOp::rbs(theta, q0, q1))
    }

    /// Apply controlled-Rx gate.
    pub fn crx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(GateOp::controlled(ControlledKind::CRx, theta, control, target))
    }

    /// Apply controlled-Ry gate.
    pub fn cry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(GateOp::controlled(ControlledKind::CRy, theta, control, target))
    }

    /// Apply controlled-Rz gate.
    pub fn crz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(GateOp::controlled(ControlledKind::CRz, theta, control, target))
    }

    /// Finish the segment.
    pub fn build(self) -> Segment {
        Segment {
            kind: self.kind,
            label: self.label,
            register: self.register,
            ops: self.ops,
            parameters: self.parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(n: u32) -> SegmentBuilder {
        SegmentBuilder::new(SegmentKind::Ansatz, "test", QubitRegister::new(n))
    }

    #[test]
    fn test_fluent_api() {
        let mut b = builder(2);
        let theta = b.parameter("θ[0]", 0.1);
        b.h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .ry(theta, QubitId(1))
            .unwrap();
        let seg = b.build();
        assert_eq!(seg.len(), 3);
        assert_eq!(seg.num_parameters(), 1);
        assert_eq!(seg.parameters()[0].name, "θ[0]");
        assert!(seg.validate().is_ok());
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut b = builder(2);
        let err = b.cx(QubitId(0), QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitOutOfRange { num_qubits: 2, .. }));
        assert_eq!(b.num_ops(), 0);
    }

    #[test]
    fn test_duplicate_qubit() {
        let mut b = builder(2);
        assert!(matches!(
            b.cx(QubitId(1), QubitId(1)),
            Err(IrError::DuplicateQubit { .. })
        ));
    }

    #[test]
    fn test_slot_must_exist_before_use() {
        let mut b = builder(1);
        let err = b.rz(ParameterExpression::slot(0), QubitId(0)).unwrap_err();
        assert!(matches!(
            err,
            IrError::UnknownParameter {
                slot: 0,
                allocated: 0,
                ..
            }
        ));
        let p = b.parameter("θ[0]", 0.0);
        assert!(b.rz(p, QubitId(0)).is_ok());
    }

    #[test]
    fn test_segment_serde() {
        let mut b = builder(2);
        let p = b.parameter("θ[0]", 0.5);
        b.rbs(p, QubitId(0), QubitId(1)).unwrap();
        let seg = b.build();
        let json = serde_json::to_string(&seg).unwrap();
        let back: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(seg, back);
    }
}
