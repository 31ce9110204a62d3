//! Variational ansatz templates.
//!
//! Every template is a closed-form layout over `N` qubits and `D` layers.
//! The slot count is known before anything is built, so callers can size
//! parameter buffers up front; [`AnsatzSpec::build`] always reserves exactly
//! [`AnsatzSpec::num_parameters`] slots.
//!
//! A spec can also start at a later layer (`start_layer`). Building layers
//! `0..D` in one spec or as `D` single-layer specs yields the same gate
//! sequence, which is what interleaved placements rely on. Once-only
//! preparation gates (QAOA's Hadamards, Unary's excitation, EfficientSU2's
//! leading rotation block) belong to layer 0.

mod brickwork;
mod butterfly;
mod cross;
mod qaoa;
mod qcn;
mod su2;
mod unary;

use std::fmt;
use std::ops::Range;

use qcompose_ir::{ParameterExpression, QubitRegister, Segment, SegmentBuilder, SegmentKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnsatzError, AnsatzResult};

/// The template library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnsatzTemplate {
    /// Alternating nearest-neighbour RBS layers.
    Brickwork,
    /// Ry layer followed by log₂N butterfly CX stages.
    ButterflyOrthogonal,
    /// RBS on mirrored pairs, then on neighbours.
    CrossOrthogonal,
    /// QAOA cost/mixer layers with shared angles.
    Qaoa,
    /// Quantum convolutional network with pooling.
    Qcn,
    /// One-hot excitation spread by controlled partial swaps.
    Unary,
    /// Rx/Ry/Rz blocks separated by reversed CX chains.
    EfficientSu2,
}

impl AnsatzTemplate {
    /// Every template, in documentation order.
    pub const ALL: [AnsatzTemplate; 7] = [
        AnsatzTemplate::Brickwork,
        AnsatzTemplate::ButterflyOrthogonal,
        AnsatzTemplate::CrossOrthogonal,
        AnsatzTemplate::Qaoa,
        AnsatzTemplate::Qcn,
        AnsatzTemplate::Unary,
        AnsatzTemplate::EfficientSu2,
    ];

    /// Snake-case name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            AnsatzTemplate::Brickwork => "brickwork",
            AnsatzTemplate::ButterflyOrthogonal => "butterfly_orthogonal",
            AnsatzTemplate::CrossOrthogonal => "cross_orthogonal",
            AnsatzTemplate::Qaoa => "qaoa",
            AnsatzTemplate::Qcn => "qcn",
            AnsatzTemplate::Unary => "unary",
            AnsatzTemplate::EfficientSu2 => "efficient_su2",
        }
    }

    /// Check the template's structural requirement for `layers` on `n_qubits`.
    fn check(self, n_qubits: u32, layers: &Range<usize>) -> AnsatzResult<()> {
        let requirement = match self {
            AnsatzTemplate::Brickwork => brickwork::check(n_qubits),
            AnsatzTemplate::ButterflyOrthogonal => butterfly::check(n_qubits),
            AnsatzTemplate::CrossOrthogonal => cross::check(n_qubits),
            AnsatzTemplate::Qaoa => qaoa::check(n_qubits),
            AnsatzTemplate::Qcn => qcn::check(n_qubits, layers),
            AnsatzTemplate::Unary => unary::check(n_qubits),
            AnsatzTemplate::EfficientSu2 => su2::check(n_qubits),
        };
        match requirement {
            Some(requirement) => Err(AnsatzError::QubitCountMismatch {
                template: self,
                n_qubits,
                requirement,
            }),
            None => Ok(()),
        }
    }

    fn slots(self, n_qubits: u32, layers: Range<usize>) -> usize {
        match self {
            AnsatzTemplate::Brickwork => brickwork::num_parameters(n_qubits, layers),
            AnsatzTemplate::ButterflyOrthogonal => butterfly::num_parameters(n_qubits, layers),
            AnsatzTemplate::CrossOrthogonal => cross::num_parameters(n_qubits, layers),
            AnsatzTemplate::Qaoa => qaoa::num_parameters(layers),
            AnsatzTemplate::Qcn => qcn::num_parameters(n_qubits, layers),
            AnsatzTemplate::Unary => unary::num_parameters(n_qubits, layers),
            AnsatzTemplate::EfficientSu2 => su2::num_parameters(n_qubits, layers),
        }
    }

    fn emit(self, b: &mut SegmentBuilder, slots: &Slots<'_>, layers: Range<usize>) -> AnsatzResult<()> {
        match self {
            AnsatzTemplate::Brickwork => brickwork::build(b, slots, layers),
            AnsatzTemplate::ButterflyOrthogonal => butterfly::build(b, slots, layers),
            AnsatzTemplate::CrossOrthogonal => cross::build(b, slots, layers),
            AnsatzTemplate::Qaoa => qaoa::build(b, slots, layers),
            AnsatzTemplate::Qcn => qcn::build(b, slots, layers),
            AnsatzTemplate::Unary => unary::build(b, slots, layers),
            AnsatzTemplate::EfficientSu2 => su2::build(b, slots, layers),
        }
    }
}

impl fmt::Display for AnsatzTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A template together with its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsatzSpec {
    /// The template.
    pub template: AnsatzTemplate,
    /// Number of layers.
    pub depth: usize,
    /// Index of the first layer this spec builds.
    #[serde(default)]
    pub start_layer: usize,
}

impl AnsatzSpec {
    /// Layers `0..depth` of `template`.
    pub fn new(template: AnsatzTemplate, depth: usize) -> Self {
        Self {
            template,
            depth,
            start_layer: 0,
        }
    }

    /// Start at layer `layer` instead of 0.
    #[must_use]
    pub fn starting_at(mut self, layer: usize) -> Self {
        self.start_layer = layer;
        self
    }

    /// The layer indices this spec covers.
    ///
    /// Fails if the last layer index does not fit in a `usize`.
    pub fn layers(&self) -> AnsatzResult<Range<usize>> {
        let end = self
            .start_layer
            .checked_add(self.depth)
            .ok_or(AnsatzError::InvalidStartLayer {
                start_layer: self.start_layer,
                depth: self.depth,
            })?;
        Ok(self.start_layer..end)
    }

    /// Split into single-layer specs covering the same layers.
    pub fn split_layers(&self) -> AnsatzResult<Vec<AnsatzSpec>> {
        Ok(self
            .layers()?
            .map(|l| AnsatzSpec::new(self.template, 1).starting_at(l))
            .collect())
    }

    /// Validate the shape against a register of `n_qubits`.
    pub fn validate(&self, n_qubits: u32) -> AnsatzResult<()> {
        if self.depth < 1 {
            return Err(AnsatzError::InvalidDepth(self.depth));
        }
        self.template.check(n_qubits, &self.layers()?)
    }

    /// Number of parameter slots the template consumes on `n_qubits`.
    pub fn num_parameters(&self, n_qubits: u32) -> AnsatzResult<usize> {
        self.validate(n_qubits)?;
        Ok(self.template.slots(n_qubits, self.layers()?))
    }

    /// Segment label: the template name, with the first layer if not 0.
    pub fn label(&self) -> String {
        if self.start_layer == 0 {
            self.template.name().to_owned()
        } else {
            format!("{}@{}", self.template.name(), self.start_layer)
        }
    }

    /// Build the template on `register`.
    ///
    /// `initial` seeds the slot values; when absent every slot starts at 0.
    pub fn build(&self, register: QubitRegister, initial: Option<&[f64]>) -> AnsatzResult<Segment> {
        let expected = self.num_parameters(register.len())?;
        if let Some(values) = initial {
            if values.len() != expected {
                return Err(AnsatzError::ParameterCountMismatch {
                    template: self.template,
                    expected,
                    got: values.len(),
                });
            }
        }

        let mut builder = SegmentBuilder::new(SegmentKind::Ansatz, self.label(), register);
        let slots = Slots { initial };
        self.template.emit(&mut builder, &slots, self.layers()?)?;

        debug!(
            template = %self.template,
            depth = self.depth,
            start_layer = self.start_layer,
            n_qubits = register.len(),
            n_params = builder.num_parameters(),
            n_ops = builder.num_ops(),
            "built ansatz"
        );
        Ok(builder.build())
    }
}

/// Slot allocator shared by the template builders.
pub(crate) struct Slots<'a> {
    initial: Option<&'a [f64]>,
}

impl Slots<'_> {
    /// Allocate the next `θ[k]` slot.
    pub(crate) fn theta(&self, b: &mut SegmentBuilder) -> ParameterExpression {
        let k = b.num_parameters();
        self.named(b, format!("θ[{k}]"))
    }

    /// Allocate the next slot under `name`.
    pub(crate) fn named(&self, b: &mut SegmentBuilder, name: String) -> ParameterExpression {
        let k = b.num_parameters();
        let value = self
            .initial
            .and_then(|values| values.get(k).copied())
            .unwrap_or(0.0);
        b.parameter(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(spec: AnsatzSpec, n: u32) -> (usize, usize) {
        let seg = spec.build(QubitRegister::new(n), None).unwrap();
        (seg.num_parameters(), seg.len())
    }

    #[test]
    fn declared_slots_match_built_slots() {
        for template in AnsatzTemplate::ALL {
            for n in [2u32, 4, 8] {
                for depth in 1..=3 {
                    let spec = AnsatzSpec::new(template, depth);
                    let Ok(declared) = spec.num_parameters(n) else {
                        continue;
                    };
                    let seg = spec.build(QubitRegister::new(n), None).unwrap();
                    assert_eq!(seg.num_parameters(), declared, "{template} n={n} d={depth}");
                }
            }
        }
    }

    #[test]
    fn zero_depth_is_rejected() {
        for template in AnsatzTemplate::ALL {
            assert_eq!(
                AnsatzSpec::new(template, 0).num_parameters(4),
                Err(AnsatzError::InvalidDepth(0))
            );
        }
    }

    #[test]
    fn overflowing_start_layer_is_rejected() {
        for template in AnsatzTemplate::ALL {
            let spec = AnsatzSpec::new(template, 1).starting_at(usize::MAX);
            let expected = AnsatzError::InvalidStartLayer {
                start_layer: usize::MAX,
                depth: 1,
            };
            assert_eq!(spec.num_parameters(4), Err(expected.clone()), "{template}");
            assert_eq!(spec.build(QubitRegister::new(4), None).unwrap_err(), expected);
            assert_eq!(spec.split_layers(), Err(expected));
        }
    }

    #[test]
    fn butterfly_four_qubits_depth_two() {
        assert_eq!(counts(AnsatzSpec::new(AnsatzTemplate::ButterflyOrthogonal, 2), 4), (8, 14));
    }

    #[test]
    fn initial_values_are_used_in_order() {
        let spec = AnsatzSpec::new(AnsatzTemplate::Brickwork, 1);
        let seg = spec
            .build(QubitRegister::new(4), Some(&[0.1, 0.2]))
            .unwrap();
        let values: Vec<f64> = seg.parameters().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.1, 0.2]);
    }

    #[test]
    fn wrong_initial_length() {
        let spec = AnsatzSpec::new(AnsatzTemplate::Brickwork, 1);
        assert_eq!(
            spec.build(QubitRegister::new(4), Some(&[0.1])),
            Err(AnsatzError::ParameterCountMismatch {
                template: AnsatzTemplate::Brickwork,
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn split_layers_concatenate_to_full_depth() {
        for template in AnsatzTemplate::ALL {
            let n = 4;
            let full = AnsatzSpec::new(template, 2)
                .build(QubitRegister::new(n), None)
                .unwrap();
            let mut ops = vec![];
            let mut offset = 0;
            for layer in AnsatzSpec::new(template, 2).split_layers().unwrap() {
                let seg = layer.build(QubitRegister::new(n), None).unwrap();
                ops.extend(seg.ops().iter().map(|op| op.shifted(offset)));
                offset += seg.num_parameters();
            }
            assert_eq!(ops, full.ops(), "{template}");
            assert_eq!(offset, full.num_parameters());
        }
    }

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&AnsatzTemplate::ButterflyOrthogonal).unwrap();
        assert_eq!(json, "\"butterfly_orthogonal\"");
        let spec: AnsatzSpec =
            serde_json::from_str(r#"{"template": "efficient_su2", "depth": 2}"#).unwrap();
        assert_eq!(spec, AnsatzSpec::new(AnsatzTemplate::EfficientSu2, 2));
    }
}
