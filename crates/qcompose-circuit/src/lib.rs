//! `qcompose-circuit`: circuit composition.
//!
//! Assembles encoder, ansatz and Trotter segments into one parametrized
//! circuit on a fixed register, with a single flattened parameter vector.
//!
//! # Core Components
//!
//! - [`Composer`]: append-only composition session
//! - [`ComposedCircuit`]: the frozen result, with provenance per operation
//! - [`SegmentSpec`]: data describing one segment, and [`compose`] to build
//!   a whole list of them
//! - [`Placement`]: before / after / interleaved orderings of an ansatz and
//!   a Trotter block
//! - [`CompositionConfig`]: YAML or JSON configuration files
//! - [`ExecutionBackend`]: the boundary to whatever runs the circuit
//!
//! # Example
//!
//! ```rust
//! use qcompose_circuit::{Placement, SegmentSpec, compose};
//! use qcompose_circuit::spec::{AnsatzBlock, TrotterBlock};
//! use qcompose_ansatz::AnsatzTemplate;
//! use qcompose_ir::{Axis, QubitRegister};
//! use qcompose_sim::{Hamiltonian, HamiltonianTerm};
//!
//! let h = Hamiltonian::from_terms(vec![HamiltonianTerm::zz(0, 1, 1.0)]);
//! let ansatz = AnsatzBlock::new(AnsatzTemplate::ButterflyOrthogonal, 2);
//! let trotter = TrotterBlock::new(h, 1.0, 2);
//!
//! let mut specs = vec![SegmentSpec::encoder(Axis::Y, vec![0.1, 0.2, 0.3, 0.4])];
//! specs.extend(Placement::Interleaved.arrange(&ansatz, &trotter, 4));
//!
//! let circuit = compose(QubitRegister::new(4), &specs).unwrap();
//! assert_eq!(circuit.num_parameters(), 12);
//! assert_eq!(circuit.segments().len(), 5);
//! ```

pub mod backend;
pub mod circuit;
pub mod composer;
pub mod config;
pub mod error;
pub mod spec;

pub use backend::{ExecutionBackend, ReferenceBackend, ReferenceOutcome};
pub use circuit::{ComposedCircuit, ComposedOp, ParameterEntry, ParameterVector, Provenance, SegmentSpan};
pub use composer::{Composer, SessionState, compose};
pub use config::{CompositionConfig, ConfigError};
pub use error::{ComposeError, ComposeResult, ErrorKind};
pub use spec::{Placement, SegmentSpec};
