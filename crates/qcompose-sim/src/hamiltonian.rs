//! Hamiltonian data structures.
//!
//! A Hamiltonian is a sum of weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z). Coefficients are stored as complex numbers so that a
//! non-Hermitian input can be detected and rejected before decomposition.
//!
//! # Example
//!
//! ```rust
//! use qcompose_sim::hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
//!
//! // H = -1.0·Z₀Z₁  +  0.5·X₀
//! let h = Hamiltonian::from_terms(vec![
//!     HamiltonianTerm::new(-1.0, PauliString::from_ops(vec![(0, PauliOp::Z), (1, PauliOp::Z)])),
//!     HamiltonianTerm::new( 0.5, PauliString::from_ops(vec![(0, PauliOp::X)])),
//! ]);
//! assert_eq!(h.n_terms(), 2);
//! assert!(h.validate().is_ok());
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{SimError, SimResult};

/// Largest imaginary part still treated as a real coefficient.
pub const HERMITIAN_TOLERANCE: f64 = 1e-12;

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity; contributes a global phase and is skipped in synthesis.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl TryFrom<char> for PauliOp {
    type Error = SimError;

    fn try_from(c: char) -> SimResult<Self> {
        match c.to_ascii_uppercase() {
            'I' => Ok(PauliOp::I),
            'X' => Ok(PauliOp::X),
            'Y' => Ok(PauliOp::Y),
            'Z' => Ok(PauliOp::Z),
            _ => Err(SimError::InvalidPauliLabel(c)),
        }
    }
}

/// A tensor product of Pauli operators on named qubits.
///
/// Stored as a sorted `Vec<(qubit_index, PauliOp)>` with Identity terms
/// omitted. Qubits not listed are implicitly I. The sort order is the term's
/// fixed qubit order during synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(u32, PauliOp)>", into = "Vec<(u32, PauliOp)>")]
pub struct PauliString {
    /// Non-identity terms, sorted by qubit index ascending.
    ops: Vec<(u32, PauliOp)>,
}

impl PauliString {
    /// Construct a PauliString from an iterator of (qubit, op) pairs.
    ///
    /// Identity operators are dropped; the remaining ops are sorted by qubit.
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> Self {
        let mut v: Vec<(u32, PauliOp)> = ops
            .into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .collect();
        v.sort_by_key(|(q, _)| *q);
        Self { ops: v }
    }

    /// Parse a label such as `"XIZ"`, where character `i` acts on qubit `i`.
    pub fn from_label(label: &str) -> SimResult<Self> {
        let ops = label
            .chars()
            .enumerate()
            .map(|(q, c)| -> SimResult<(u32, PauliOp)> { Ok((q as u32, PauliOp::try_from(c)?)) })
            .collect::<SimResult<Vec<_>>>()?;
        Ok(Self::from_ops(ops))
    }

    /// Construct a Z⊗Z⊗...⊗Z string spanning the given qubits.
    pub fn zz(qubits: impl IntoIterator<Item = u32>) -> Self {
        Self::from_ops(qubits.into_iter().map(|q| (q, PauliOp::Z)))
    }

    /// Return the non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    /// Number of non-identity factors.
    pub fn weight(&self) -> usize {
        self.ops.len()
    }

    /// True if there are no non-identity operators (pure global phase).
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// The highest qubit index referenced, or `None` for an identity string.
    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|(q, _)| *q)
    }
}

impl From<Vec<(u32, PauliOp)>> for PauliString {
    fn from(ops: Vec<(u32, PauliOp)>) -> Self {
        Self::from_ops(ops)
    }
}

impl From<PauliString> for Vec<(u32, PauliOp)> {
    fn from(p: PauliString) -> Self {
        p.ops
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HamiltonianTerm {
    /// Coefficient; must be real for the evolution to stay unitary.
    #[serde(deserialize_with = "deserialize_coeff")]
    pub coeff: Complex64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl HamiltonianTerm {
    /// Create a new term.
    pub fn new(coeff: impl Into<Complex64>, pauli: PauliString) -> Self {
        Self {
            coeff: coeff.into(),
            pauli,
        }
    }

    /// Shorthand: single-qubit Z term.
    pub fn z(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::Z)]))
    }

    /// Shorthand: ZZ coupling term.
    pub fn zz(q0: u32, q1: u32, coeff: f64) -> Self {
        Self::new(
            coeff,
            PauliString::from_ops([(q0, PauliOp::Z), (q1, PauliOp::Z)]),
        )
    }

    /// Shorthand: single-qubit X term.
    pub fn x(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::X)]))
    }

    /// Shorthand: single-qubit Y term.
    pub fn y(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::Y)]))
    }

    /// True if the coefficient is real within [`HERMITIAN_TOLERANCE`].
    pub fn is_hermitian(&self) -> bool {
        self.coeff.im.abs() <= HERMITIAN_TOLERANCE
    }

    /// The real part of the coefficient.
    pub fn real_coeff(&self) -> f64 {
        self.coeff.re
    }
}

/// A sum-of-Pauli-strings Hamiltonian.
///
/// H = Σ_k  c_k · P_k
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hamiltonian {
    terms: Vec<HamiltonianTerm>,
}

impl Hamiltonian {
    /// Create from a list of terms. Term order is preserved.
    pub fn from_terms(terms: Vec<HamiltonianTerm>) -> Self {
        Self { terms }
    }

    /// All terms.
    pub fn terms(&self) -> &[HamiltonianTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// True if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Spectral norm upper bound: Σ |c_k|.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.norm()).sum()
    }

    /// The minimum number of qubits required to represent this Hamiltonian.
    ///
    /// Returns 0 if the Hamiltonian is empty or purely identity.
    pub fn min_qubits(&self) -> u32 {
        self.terms
            .iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .map_or(0, |q| q + 1)
    }

    /// Check that the Hamiltonian is non-empty and every coefficient is real.
    pub fn validate(&self) -> SimResult<()> {
        if self.terms.is_empty() {
            return Err(SimError::EmptyHamiltonian);
        }
        if let Some((term_index, term)) = self
            .terms
            .iter()
            .enumerate()
            .find(|(_, t)| !t.is_hermitian())
        {
            return Err(SimError::NonHermitianTerm {
                term_index,
                coeff: term.coeff,
            });
        }
        Ok(())
    }
}

impl FromIterator<HamiltonianTerm> for Hamiltonian {
    fn from_iter<T: IntoIterator<Item = HamiltonianTerm>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

/// Accept either a bare real number or a `[re, im]` pair.
fn deserialize_coeff<'de, D>(deserializer: D) -> Result<Complex64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coeff {
        Real(f64),
        Pair([f64; 2]),
    }

    Ok(match Coeff::deserialize(deserializer)? {
        Coeff::Real(re) => Complex64::new(re, 0.0),
        Coeff::Pair([re, im]) => Complex64::new(re, im),
    })
}
