//! Qubit identifiers and the fixed-size register they live in.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// Unique identifier for a qubit within a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Index of the qubit as a `usize`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// An ordered register of qubits `0..N`.
///
/// The size is fixed at construction; every segment and composed circuit
/// records the register it was built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QubitRegister {
    size: u32,
}

impl QubitRegister {
    /// Create a register of `size` qubits.
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    /// Number of qubits.
    #[inline]
    pub fn len(&self) -> u32 {
        self.size
    }

    /// True for the zero-qubit register.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Iterate over the qubits in order.
    pub fn qubits(&self) -> impl DoubleEndedIterator<Item = QubitId> + ExactSizeIterator {
        (0..self.size).map(QubitId)
    }

    /// Check whether a qubit belongs to this register.
    #[inline]
    pub fn contains(&self, qubit: QubitId) -> bool {
        qubit.0 < self.size
    }

    /// Return an error unless `qubit` belongs to this register.
    pub fn check(&self, qubit: QubitId, gate_name: Option<&str>) -> IrResult<()> {
        if self.contains(qubit) {
            Ok(())
        } else {
            Err(IrError::QubitOutOfRange {
                qubit,
                num_qubits: self.size,
                gate_name: gate_name.map(str::to_owned),
            })
        }
    }
}

impl fmt::Display for QubitRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q[{}]", self.size)
    }
}
