//! The assembled circuit and its parameter vector.

use std::collections::BTreeMap;
use std::ops::Range;

use qcompose_ir::{GateCategory, GateOp, QubitRegister, SegmentKind};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{ComposeError, ComposeResult};

/// Where a composed operation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provenance {
    /// Position of the source segment in the composition.
    pub segment: usize,
    /// Kind of the source segment.
    pub kind: SegmentKind,
}

/// A gate operation with its slot references in parameter-vector numbering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedOp {
    /// The operation.
    pub op: GateOp,
    /// The segment that produced it.
    pub provenance: Provenance,
}

/// One entry of the parameter vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterEntry {
    /// Slot name as given by the producing segment, e.g. `θ[3]`.
    pub name: String,
    /// Initial value.
    pub value: f64,
    /// Position of the producing segment.
    pub segment: usize,
}

/// The flattened, frozen parameter manifest of a composed circuit.
///
/// Slots appear in composition order: all slots of segment 0, then all
/// slots of segment 1, and so on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterVector {
    entries: Vec<ParameterEntry>,
}

impl ParameterVector {
    pub(crate) fn push(&mut self, entry: ParameterEntry) {
        self.entries.push(entry);
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no slots.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in slot order.
    pub fn entries(&self) -> &[ParameterEntry] {
        &self.entries
    }

    /// Entry for slot `index`.
    pub fn get(&self, index: usize) -> Option<&ParameterEntry> {
        self.entries.get(index)
    }

    /// Slot names in slot order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Initial values in slot order.
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.value).collect()
    }
}

/// Operation and slot ranges covered by one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSpan {
    /// Kind of the segment.
    pub kind: SegmentKind,
    /// Label of the segment.
    pub label: String,
    /// Indices into [`ComposedCircuit::ops`].
    pub ops: Range<usize>,
    /// Indices into the parameter vector.
    pub parameters: Range<usize>,
}

/// An assembled circuit. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedCircuit {
    register: QubitRegister,
    ops: Vec<ComposedOp>,
    parameters: ParameterVector,
    segments: Vec<SegmentSpan>,
}

impl ComposedCircuit {
    pub(crate) fn from_parts(
        register: QubitRegister,
        ops: Vec<ComposedOp>,
        parameters: ParameterVector,
        segments: Vec<SegmentSpan>,
    ) -> Self {
        Self {
            register,
            ops,
            parameters,
            segments,
        }
    }

    /// The register every operation acts on.
    pub fn register(&self) -> QubitRegister {
        self.register
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.register.len()
    }

    /// Operations with provenance, in order.
    pub fn ops(&self) -> &[ComposedOp] {
        &self.ops
    }

    /// Gate operations without provenance.
    pub fn gate_ops(&self) -> impl Iterator<Item = &GateOp> {
        self.ops.iter().map(|c| &c.op)
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True if the circuit has no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The parameter manifest.
    pub fn parameters(&self) -> &ParameterVector {
        &self.parameters
    }

    /// Length of the parameter vector.
    pub fn num_parameters(&self) -> usize {
        self.parameters.len()
    }

    /// Per-segment spans in composition order.
    pub fn segments(&self) -> &[SegmentSpan] {
        &self.segments
    }

    /// Operation counts by gate name.
    pub fn gate_counts(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for op in self.gate_ops() {
            *counts.entry(op.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Operation counts by gate category.
    pub fn category_counts(&self) -> BTreeMap<GateCategory, usize> {
        let mut counts = BTreeMap::new();
        for op in self.gate_ops() {
            *counts.entry(op.category()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of two-qubit operations.
    pub fn entangler_count(&self) -> usize {
        self.gate_ops().filter(|op| op.is_entangling()).count()
    }

    /// Operation counts by segment kind.
    pub fn kind_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for op in &self.ops {
            *counts.entry(op.provenance.kind.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Substitute `values` for every slot.
    ///
    /// Returns the gate sequence with numeric angles only.
    pub fn bind(&self, values: &[f64]) -> ComposeResult<Vec<GateOp>> {
        if values.len() != self.num_parameters() {
            return Err(ComposeError::ParameterCountMismatch {
                expected: self.num_parameters(),
                got: values.len(),
            });
        }
        self.gate_ops()
            .enumerate()
            .map(|(i, op)| {
                op.bound(values).map_err(|source| ComposeError::InvalidSegment {
                    segment: self.ops[i].provenance.segment,
                    kind: self.ops[i].provenance.kind,
                    source,
                })
            })
            .collect()
    }

    /// Bind the initial values recorded in the parameter vector.
    pub fn bound_default(&self) -> ComposeResult<Vec<GateOp>> {
        self.bind(&self.parameters.values())
    }

    /// Concatenate `other` after `self` into a new circuit.
    ///
    /// `other`'s slots and segment indices move up past `self`'s, so
    /// `a.then(b).then(c) == a.then(b.then(c))`.
    pub fn then(&self, other: &ComposedCircuit) -> ComposeResult<ComposedCircuit> {
        if other.register != self.register {
            return Err(ComposeError::QubitRegisterMismatch {
                segment: self.segments.len(),
                expected: self.register.len(),
                got: other.register.len(),
            });
        }

        let slot_offset = self.num_parameters();
        let op_offset = self.len();
        let segment_offset = self.segments.len();

        let mut ops = self.ops.clone();
        ops.extend(other.ops.iter().map(|c| ComposedOp {
            op: c.op.shifted(slot_offset),
            provenance: Provenance {
                segment: c.provenance.segment + segment_offset,
                kind: c.provenance.kind,
            },
        }));

        let mut parameters = self.parameters.clone();
        for entry in other.parameters.entries() {
            parameters.push(ParameterEntry {
                segment: entry.segment + segment_offset,
                ..entry.clone()
            });
        }

        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().map(|span| SegmentSpan {
            kind: span.kind,
            label: span.label.clone(),
            ops: span.ops.start + op_offset..span.ops.end + op_offset,
            parameters: span.parameters.start + slot_offset..span.parameters.end + slot_offset,
        }));

        Ok(ComposedCircuit::from_parts(self.register, ops, parameters, segments))
    }
}
