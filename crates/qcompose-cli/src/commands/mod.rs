//! CLI command implementations.

pub mod build;
pub mod common;
pub mod templates;
pub mod trotter;
pub mod version;
