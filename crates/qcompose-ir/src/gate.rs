//! Gate operations.
//!
//! A [`GateOp`] is purely descriptive: it names the gate, the qubits it acts
//! on, and (for parameterized gates) an angle expression over parameter
//! slots. Matrices and execution live with the backend.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::IrResult;
use crate::parameter::ParameterExpression;
use crate::qubit::QubitId;

/// Rotation axis of a single-qubit rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Rotation around X.
    X,
    /// Rotation around Y.
    Y,
    /// Rotation around Z.
    Z,
}

impl Axis {
    /// Lower-case axis letter.
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

/// Fixed single-qubit gates used for state preparation and basis changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CliffordGate {
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// Pauli-X gate.
    X,
}

impl CliffordGate {
    /// Get the name of this gate.
    pub fn name(self) -> &'static str {
        match self {
            CliffordGate::H => "h",
            CliffordGate::S => "s",
            CliffordGate::Sdg => "sdg",
            CliffordGate::X => "x",
        }
    }
}

/// Fixed two-qubit entangling gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntanglerKind {
    /// Controlled-X (CNOT); the first qubit is the control.
    CX,
}

impl EntanglerKind {
    /// Get the name of this gate.
    pub fn name(self) -> &'static str {
        match self {
            EntanglerKind::CX => "cx",
        }
    }
}

/// Controlled single-qubit rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlledKind {
    /// Controlled rotation around X.
    CRx,
    /// Controlled rotation around Y.
    CRy,
    /// Controlled rotation around Z.
    CRz,
}

impl ControlledKind {
    /// Get the name of this gate.
    pub fn name(self) -> &'static str {
        match self {
            ControlledKind::CRx => "crx",
            ControlledKind::CRy => "cry",
            ControlledKind::CRz => "crz",
        }
    }

    /// Axis of the controlled rotation.
    pub fn axis(self) -> Axis {
        match self {
            ControlledKind::CRx => Axis::X,
            ControlledKind::CRy => Axis::Y,
            ControlledKind::CRz => Axis::Z,
        }
    }
}

/// Coarse gate categories used for gate-count diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateCategory {
    /// Single-qubit rotation.
    Rotation,
    /// Fixed single-qubit gate.
    Clifford,
    /// Fixed two-qubit entangler.
    Entangler,
    /// Parameterized two-qubit interaction (RBS).
    Interaction,
    /// Controlled rotation.
    Controlled,
}

/// A single gate operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GateOp {
    /// Single-qubit rotation `R_axis(angle)`.
    Rotation {
        /// Rotation axis.
        axis: Axis,
        /// Target qubit.
        qubit: QubitId,
        /// Rotation angle.
        angle: ParameterExpression,
    },
    /// Fixed single-qubit gate.
    Clifford {
        /// The gate.
        gate: CliffordGate,
        /// Target qubit.
        qubit: QubitId,
    },
    /// Fixed two-qubit entangler.
    Entangler {
        /// The entangler.
        kind: EntanglerKind,
        /// The qubit pair; for CX the first entry is the control.
        qubits: [QubitId; 2],
    },
    /// Reconfigurable beam splitter: a Givens rotation on the
    /// `{|01⟩, |10⟩}` subspace of the pair.
    Rbs {
        /// The qubit pair.
        qubits: [QubitId; 2],
        /// Mixing angle.
        angle: ParameterExpression,
    },
    /// Controlled single-qubit rotation.
    Controlled {
        /// The controlled rotation.
        kind: ControlledKind,
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
        /// Rotation angle.
        angle: ParameterExpression,
    },
}

impl GateOp {
    /// Single-qubit rotation.
    pub fn rotation(axis: Axis, angle: impl Into<ParameterExpression>, qubit: QubitId) -> Self {
        GateOp::Rotation {
            axis,
            qubit,
            angle: angle.into(),
        }
    }

    /// Fixed single-qubit gate.
    pub fn clifford(gate: CliffordGate, qubit: QubitId) -> Self {
        GateOp::Clifford { gate, qubit }
    }

    /// Fixed two-qubit entangler.
    pub fn entangler(kind: EntanglerKind, q0: QubitId, q1: QubitId) -> Self {
        GateOp::Entangler {
            kind,
            qubits: [q0, q1],
        }
    }

    /// RBS interaction.
    pub fn rbs(angle: impl Into<ParameterExpression>, q0: QubitId, q1: QubitId) -> Self {
        GateOp::Rbs {
            qubits: [q0, q1],
            angle: angle.into(),
        }
    }

    /// Controlled rotation.
    pub fn controlled(
        kind: ControlledKind,
        angle: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> Self {
        GateOp::Controlled {
            kind,
            control,
            target,
            angle: angle.into(),
        }
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &'static str {
        match self {
            GateOp::Rotation { axis, .. } => match axis {
                Axis::X => "rx",
                Axis::Y => "ry",
                Axis::Z => "rz",
            },
            GateOp::Clifford { gate, .. } => gate.name(),
            GateOp::Entangler { kind, .. } => kind.name(),
            GateOp::Rbs { .. } => "rbs",
            GateOp::Controlled { kind, .. } => kind.name(),
        }
    }

    /// Gate category.
    pub fn category(&self) -> GateCategory {
        match self {
            GateOp::Rotation { .. } => GateCategory::Rotation,
            GateOp::Clifford { .. } => GateCategory::Clifford,
            GateOp::Entangler { .. } => GateCategory::Entangler,
            GateOp::Rbs { .. } => GateCategory::Interaction,
            GateOp::Controlled { .. } => GateCategory::Controlled,
        }
    }

    /// Qubits this operation acts on, controls first.
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            GateOp::Rotation { qubit, .. } | GateOp::Clifford { qubit, .. } => vec![*qubit],
            GateOp::Entangler { qubits, .. } | GateOp::Rbs { qubits, .. } => qubits.to_vec(),
            GateOp::Controlled {
                control, target, ..
            } => vec![*control, *target],
        }
    }

    /// Number of qubits this operation acts on.
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateOp::Rotation { .. } | GateOp::Clifford { .. } => 1,
            _ => 2,
        }
    }

    /// True for operations acting on two qubits.
    pub fn is_entangling(&self) -> bool {
        self.num_qubits() > 1
    }

    /// The angle expression, if this gate has one.
    pub fn angle(&self) -> Option<&ParameterExpression> {
        match self {
            GateOp::Rotation { angle, .. }
            | GateOp::Rbs { angle, .. }
            | GateOp::Controlled { angle, .. } => Some(angle),
            GateOp::Clifford { .. } | GateOp::Entangler { .. } => None,
        }
    }

    /// Check if this gate's angle references a parameter slot.
    pub fn is_parameterized(&self) -> bool {
        self.angle().is_some_and(ParameterExpression::is_symbolic)
    }

    /// Return a copy with every slot reference moved up by `offset`.
    #[must_use]
    pub fn shifted(&self, offset: usize) -> Self {
        self.map_angle(|a| a.shift(offset))
    }

    /// Return a copy with every angle replaced by its numeric value.
    pub fn bound(&self, values: &[f64]) -> IrResult<Self> {
        let mut out = self.clone();
        if let Some(angle) = out.angle_mut() {
            *angle = angle.bind(values)?;
        }
        Ok(out)
    }

    fn map_angle(&self, f: impl FnOnce(&ParameterExpression) -> ParameterExpression) -> Self {
        let mut out = self.clone();
        if let Some(angle) = out.angle_mut() {
            *angle = f(angle);
        }
        out
    }

    fn angle_mut(&mut self) -> Option<&mut ParameterExpression> {
        match self {
            GateOp::Rotation { angle, .. }
            | GateOp::Rbs { angle, .. }
            | GateOp::Controlled { angle, .. } => Some(angle),
            GateOp::Clifford { .. } | GateOp::Entangler { .. } => None,
        }
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qubits = self
            .qubits()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        match self.angle() {
            Some(angle) => write!(f, "{}({angle}) {qubits}", self.name()),
            None => write!(f, "{} {qubits}", self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_properties() {
        let rx = GateOp::rotation(Axis::X, ParameterExpression::slot(0), QubitId(1));
        assert_eq!(rx.name(), "rx");
        assert_eq!(rx.num_qubits(), 1);
        assert!(rx.is_parameterized());
        assert!(!rx.is_entangling());

        let cx = GateOp::entangler(EntanglerKind::CX, QubitId(0), QubitId(1));
        assert_eq!(cx.qubits(), vec![QubitId(0), QubitId(1)]);
        assert!(cx.angle().is_none());
        assert_eq!(cx.category(), GateCategory::Entangler);

        let crz = GateOp::controlled(ControlledKind::CRz, 0.5, QubitId(2), QubitId(0));
        assert_eq!(crz.qubits(), vec![QubitId(2), QubitId(0)]);
        assert!(!crz.is_parameterized());
        assert_eq!(ControlledKind::CRz.axis(), Axis::Z);
    }

    #[test]
    fn test_shift_and_bind() {
        let rbs = GateOp::rbs(ParameterExpression::slot(1), QubitId(0), QubitId(1));
        let shifted = rbs.shifted(5);
        assert_eq!(
            shifted.angle().and_then(ParameterExpression::max_slot),
            Some(6)
        );

        let bound = rbs.bound(&[0.0, 0.25]).unwrap();
        assert_eq!(bound.angle().and_then(ParameterExpression::as_f64), Some(0.25));
        assert!(rbs.bound(&[0.0]).is_err());

        let h = GateOp::clifford(CliffordGate::H, QubitId(0));
        assert_eq!(h.bound(&[]).unwrap(), h);
    }

    #[test]
    fn test_display() {
        let ry = GateOp::rotation(Axis::Y, ParameterExpression::slot(3), QubitId(2));
        assert_eq!(format!("{ry}"), "ry(p[3]) q2");
        let cx = GateOp::entangler(EntanglerKind::CX, QubitId(0), QubitId(3));
        assert_eq!(format!("{cx}"), "cx q0, q3");
    }
}
