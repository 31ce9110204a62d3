//! Segment descriptors and placements.
//!
//! A [`SegmentSpec`] is the data needed to build one segment. A composition
//! is just an ordered list of them; [`Placement`] is a helper that produces
//! the three usual orderings of an ansatz and a Trotter block.

use qcompose_ansatz::{AngleEncoder, AnsatzSpec, AnsatzTemplate};
use qcompose_ir::{Axis, QubitRegister, Segment, SegmentKind};
use qcompose_sim::{Hamiltonian, TrotterEvolution, TrotterOrder};
use serde::{Deserialize, Serialize};

use crate::error::{ComposeError, ComposeResult};

/// Angle-encoder descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderBlock {
    /// Rotation axis.
    pub axis: Axis,
    /// One feature per qubit.
    pub features: Vec<f64>,
    /// CX ranges appended after the rotations.
    #[serde(default)]
    pub entanglement_depth: usize,
}

/// Ansatz descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnsatzBlock {
    /// Template.
    pub template: AnsatzTemplate,
    /// Number of layers.
    pub depth: usize,
    /// First layer index.
    #[serde(default)]
    pub start_layer: usize,
    /// Initial slot values; zeros when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<Vec<f64>>,
}

impl AnsatzBlock {
    /// Descriptor for `depth` layers of `template` with zero initial values.
    pub fn new(template: AnsatzTemplate, depth: usize) -> Self {
        Self {
            template,
            depth,
            start_layer: 0,
            initial: None,
        }
    }

    /// The template shape.
    pub fn spec(&self) -> AnsatzSpec {
        AnsatzSpec::new(self.template, self.depth).starting_at(self.start_layer)
    }
}

/// Trotter-block descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrotterBlock {
    /// Hamiltonian to evolve under.
    pub hamiltonian: Hamiltonian,
    /// Total evolution time.
    pub time: f64,
    /// Number of Trotter steps.
    pub steps: usize,
    /// Product-formula order.
    #[serde(default)]
    pub order: TrotterOrder,
    /// Expose the evolution time as a slot.
    #[serde(default)]
    pub trainable_time: bool,
}

impl TrotterBlock {
    /// First-order block with fixed time.
    pub fn new(hamiltonian: Hamiltonian, time: f64, steps: usize) -> Self {
        Self {
            hamiltonian,
            time,
            steps,
            order: TrotterOrder::First,
            trainable_time: false,
        }
    }

    /// The decomposer this block describes.
    pub fn evolution(&self) -> TrotterEvolution {
        TrotterEvolution::new(self.hamiltonian.clone(), self.time, self.steps)
            .with_order(self.order)
            .with_trainable_time(self.trainable_time)
    }
}

/// Data needed to build one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentSpec {
    /// Angle encoder.
    Encoder(EncoderBlock),
    /// Ansatz template.
    Ansatz(AnsatzBlock),
    /// Trotterized evolution.
    Trotter(TrotterBlock),
}

impl SegmentSpec {
    /// Encoder descriptor without entangling gates.
    pub fn encoder(axis: Axis, features: Vec<f64>) -> Self {
        SegmentSpec::Encoder(EncoderBlock {
            axis,
            features,
            entanglement_depth: 0,
        })
    }

    /// Ansatz descriptor with zero initial values.
    pub fn ansatz(template: AnsatzTemplate, depth: usize) -> Self {
        SegmentSpec::Ansatz(AnsatzBlock::new(template, depth))
    }

    /// First-order Trotter descriptor with fixed time.
    pub fn trotter(hamiltonian: Hamiltonian, time: f64, steps: usize) -> Self {
        SegmentSpec::Trotter(TrotterBlock::new(hamiltonian, time, steps))
    }

    /// Kind of segment this descriptor builds.
    pub fn kind(&self) -> SegmentKind {
        match self {
            SegmentSpec::Encoder(_) => SegmentKind::Encoder,
            SegmentSpec::Ansatz(_) => SegmentKind::Ansatz,
            SegmentSpec::Trotter(_) => SegmentKind::Trotter,
        }
    }

    /// Build the segment; `index` is its position, used in errors.
    pub fn build(&self, index: usize, register: QubitRegister) -> ComposeResult<Segment> {
        let wrap = |source| ComposeError::Ansatz {
            segment: index,
            kind: self.kind(),
            source,
        };
        match self {
            SegmentSpec::Encoder(block) => AngleEncoder::new(block.axis)
                .with_entanglement_depth(block.entanglement_depth)
                .encode(&block.features, register)
                .map_err(wrap),
            SegmentSpec::Ansatz(block) => block
                .spec()
                .build(register, block.initial.as_deref())
                .map_err(wrap),
            SegmentSpec::Trotter(block) => block
                .evolution()
                .build(register)
                .map_err(|source| ComposeError::Trotter {
                    segment: index,
                    source,
                }),
        }
    }
}

/// Position of Trotter blocks relative to an ansatz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Trotter block, then the ansatz.
    Before,
    /// Ansatz, then the Trotter block.
    #[default]
    After,
    /// One Trotter block after every ansatz layer.
    Interleaved,
}

impl Placement {
    /// Order `ansatz` and `trotter` on an `n_qubits` register.
    ///
    /// For [`Placement::Interleaved`] the ansatz is split into single-layer
    /// descriptors. Initial values are split with it; a layer whose shape is
    /// invalid keeps the unsplit remainder so that building it reports the
    /// structural error. An ansatz whose layer range cannot be formed is
    /// left whole for the same reason.
    pub fn arrange(self, ansatz: &AnsatzBlock, trotter: &TrotterBlock, n_qubits: u32) -> Vec<SegmentSpec> {
        let trotter = SegmentSpec::Trotter(trotter.clone());
        match self {
            Placement::Before => vec![trotter, SegmentSpec::Ansatz(ansatz.clone())],
            Placement::After => vec![SegmentSpec::Ansatz(ansatz.clone()), trotter],
            Placement::Interleaved => {
                let Ok(layers) = ansatz.spec().split_layers() else {
                    return vec![SegmentSpec::Ansatz(ansatz.clone()), trotter];
                };
                let last = layers.len().saturating_sub(1);
                let mut offset = 0;
                let mut specs = Vec::with_capacity(2 * layers.len());
                for (i, layer) in layers.into_iter().enumerate() {
                    let initial = ansatz.initial.as_deref().map(|values| {
                        let rest = values.get(offset..).unwrap_or_default();
                        let slice = match layer.num_parameters(n_qubits) {
                            Ok(count) if i < last => {
                                offset += count;
                                rest.get(..count).unwrap_or(rest)
                            }
                            _ => rest,
                        };
                        slice.to_vec()
                    });
                    specs.push(SegmentSpec::Ansatz(AnsatzBlock {
                        template: layer.template,
                        depth: layer.depth,
                        start_layer: layer.start_layer,
                        initial,
                    }));
                    specs.push(trotter.clone());
                }
                specs
            }
        }
    }
}
