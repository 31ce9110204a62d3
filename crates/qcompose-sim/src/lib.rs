//! `qcompose-sim`: Hamiltonian decomposition and reference simulation.
//!
//! Converts a sum-of-Paulis Hamiltonian into a Trotter [`Segment`] that
//! approximates `exp(-i H t)`:
//!
//! - **Trotter-Suzuki** product formulas (first- and second-order)
//! - optional **trainable time**, exposing `t` as a parameter slot
//!
//! The [`reference`] module holds a dense statevector simulator used to
//! measure how far a decomposition is from exact evolution.
//!
//! # Quick start
//!
//! ```rust
//! use qcompose_ir::QubitRegister;
//! use qcompose_sim::hamiltonian::{Hamiltonian, HamiltonianTerm};
//! use qcompose_sim::trotter::TrotterEvolution;
//!
//! // Transverse-field Ising model: H = -J·ZZ - h·X
//! let h = Hamiltonian::from_terms(vec![
//!     HamiltonianTerm::zz(0, 1, -1.0),   // -J ZZ
//!     HamiltonianTerm::x(0, -0.5),        // -h X₀
//!     HamiltonianTerm::x(1, -0.5),        // -h X₁
//! ]);
//!
//! let evol = TrotterEvolution::new(h, 1.0 /* t */, 10 /* steps */);
//! let segment = evol.build(QubitRegister::new(2)).unwrap();
//! assert_eq!(segment.len(), evol.gate_count());
//! ```
//!
//! [`Segment`]: qcompose_ir::Segment

pub mod error;
pub mod hamiltonian;
pub mod reference;
pub mod synthesis;
pub mod trotter;

pub use error::{SimError, SimResult};
pub use hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
pub use reference::Statevector;
pub use synthesis::append_exp_pauli;
pub use trotter::{TrotterEvolution, TrotterOrder};
