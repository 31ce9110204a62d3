//! `qcompose-ansatz`: feature encoders and variational templates.
//!
//! - [`AngleEncoder`] maps a feature vector onto single-axis rotations.
//! - [`AnsatzSpec`] instantiates one of the [`AnsatzTemplate`] layouts.
//!
//! Both produce [`Segment`]s with locally numbered parameter slots, ready to
//! be appended by the composer.
//!
//! # Example
//!
//! ```rust
//! use qcompose_ansatz::{AnsatzSpec, AnsatzTemplate};
//! use qcompose_ir::QubitRegister;
//!
//! let spec = AnsatzSpec::new(AnsatzTemplate::ButterflyOrthogonal, 2);
//! assert_eq!(spec.num_parameters(4).unwrap(), 8);
//!
//! let segment = spec.build(QubitRegister::new(4), None).unwrap();
//! assert_eq!(segment.len(), 14);
//! ```
//!
//! [`Segment`]: qcompose_ir::Segment

pub mod encoder;
pub mod error;
pub mod templates;

pub use encoder::AngleEncoder;
pub use error::{AnsatzError, AnsatzResult};
pub use templates::{AnsatzSpec, AnsatzTemplate};
