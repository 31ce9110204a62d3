//! Angle encoding of classical features.
//!
//! Feature `i` becomes a rotation `R_axis(π · x[i])` on qubit `i`, with
//! `x[i]` a parameter slot holding the feature value. Rebinding the slots
//! re-encodes a new sample without rebuilding the circuit.
//!
//! An optional entanglement depth `k` appends, for each `d in 0..k`, the
//! CX gates `CX(j, j + d + 1)` after the rotations.

use qcompose_ir::{
    Axis, ParameterExpression, QubitId, QubitRegister, Segment, SegmentBuilder, SegmentKind,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnsatzError, AnsatzResult};

/// Single-axis angle encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleEncoder {
    /// Rotation axis.
    pub axis: Axis,
    /// Number of CX ranges appended after the rotations.
    #[serde(default)]
    pub entanglement_depth: usize,
}

impl AngleEncoder {
    /// Encoder with no entangling gates.
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            entanglement_depth: 0,
        }
    }

    /// Append `depth` ranges of CX gates after the rotations.
    #[must_use]
    pub fn with_entanglement_depth(mut self, depth: usize) -> Self {
        self.entanglement_depth = depth;
        self
    }

    /// Slots reserved for `n_qubits` features: one per feature.
    pub fn num_parameters(&self, n_qubits: u32) -> usize {
        n_qubits as usize
    }

    /// Encode `features` onto `register`.
    pub fn encode(&self, features: &[f64], register: QubitRegister) -> AnsatzResult<Segment> {
        let n = register.len();
        if features.len() != n as usize {
            return Err(AnsatzError::DimensionMismatch {
                features: features.len(),
                n_qubits: n,
            });
        }

        let label = format!("angle_encoder_{}", self.axis.letter());
        let mut builder = SegmentBuilder::new(SegmentKind::Encoder, label, register);

        for (q, &value) in register.qubits().zip(features) {
            let x = builder.parameter(format!("x[{}]", q.0), value);
            builder.rotation(self.axis, ParameterExpression::pi() * x, q)?;
        }

        for d in 0..self.entanglement_depth as u32 {
            for j in 0..n.saturating_sub(d + 1) {
                builder.cx(QubitId(j), QubitId(j + d + 1))?;
            }
        }

        debug!(
            axis = %self.axis,
            n_features = features.len(),
            entanglement_depth = self.entanglement_depth,
            n_ops = builder.num_ops(),
            "encoded features"
        );
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcompose_ir::GateOp;
    use std::f64::consts::PI;

    #[test]
    fn one_rotation_per_feature() {
        let seg = AngleEncoder::new(Axis::Y)
            .encode(&[0.1, 0.2, 0.3], QubitRegister::new(3))
            .unwrap();
        assert_eq!(seg.kind(), SegmentKind::Encoder);
        assert_eq!(seg.len(), 3);
        assert_eq!(seg.num_parameters(), 3);
        assert_eq!(seg.parameters()[2].name, "x[2]");
        assert!(seg.ops().iter().all(|op| op.name() == "ry"));

        let values: Vec<f64> = seg.parameters().iter().map(|p| p.value).collect();
        let angle = seg.ops()[1].angle().unwrap().evaluate(&values).unwrap();
        assert!((angle - 0.2 * PI).abs() < 1e-12);
    }

    #[test]
    fn length_mismatch() {
        let err = AngleEncoder::new(Axis::X)
            .encode(&[0.0; 3], QubitRegister::new(4))
            .unwrap_err();
        assert_eq!(
            err,
            AnsatzError::DimensionMismatch {
                features: 3,
                n_qubits: 4
            }
        );
    }

    #[test]
    fn entanglement_ranges() {
        let seg = AngleEncoder::new(Axis::Z)
            .with_entanglement_depth(2)
            .encode(&[0.0; 4], QubitRegister::new(4))
            .unwrap();
        let cx: Vec<Vec<u32>> = seg
            .ops()
            .iter()
            .filter(|op| op.name() == "cx")
            .map(|op| GateOp::qubits(op).iter().map(|q| q.0).collect())
            .collect();
        assert_eq!(
            cx,
            vec![
                vec![0, 1],
                vec![1, 2],
                vec![2, 3],
                vec![0, 2],
                vec![1, 3]
            ]
        );
    }

    #[test]
    fn deep_entanglement_on_small_register() {
        let seg = AngleEncoder::new(Axis::X)
            .with_entanglement_depth(5)
            .encode(&[0.5, 0.5], QubitRegister::new(2))
            .unwrap();
        assert_eq!(seg.len(), 3);
    }
}
