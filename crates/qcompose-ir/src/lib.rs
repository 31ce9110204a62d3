//! qcompose circuit building blocks
//!
//! This crate provides the data structures every other qcompose crate
//! builds on: qubit registers, angle expressions over parameter slots,
//! descriptive gate operations, and segments.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] and the fixed-size [`QubitRegister`]
//! - **Parameters**: [`ParameterExpression`] for angles that reference slots
//!   of a parameter vector
//! - **Gates**: [`GateOp`], a closed set of rotations, fixed gates,
//!   entanglers, RBS interactions and controlled rotations
//! - **Segments**: [`Segment`] blocks built through [`SegmentBuilder`]
//!
//! # Example: A Parameterized Segment
//!
//! ```rust
//! use qcompose_ir::{QubitId, QubitRegister, SegmentBuilder, SegmentKind};
//!
//! let mut builder = SegmentBuilder::new(SegmentKind::Ansatz, "demo", QubitRegister::new(2));
//! let theta = builder.parameter("θ[0]", 0.25);
//!
//! builder.ry(theta, QubitId(0)).unwrap();
//! builder.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let segment = builder.build();
//! assert_eq!(segment.len(), 2);
//! assert_eq!(segment.num_parameters(), 1);
//! ```

pub mod error;
pub mod gate;
pub mod parameter;
pub mod qubit;
pub mod segment;

pub use error::{IrError, IrResult};
pub use gate::{Axis, CliffordGate, ControlledKind, EntanglerKind, GateCategory, GateOp};
pub use parameter::ParameterExpression;
pub use qubit::{QubitId, QubitRegister};
pub use segment::{ParameterSlot, Segment, SegmentBuilder, SegmentKind, validate_op};
