//! Composition configuration files.
//!
//! A configuration names the register size and either an explicit segment
//! list or the encoder / ansatz / Trotter blocks plus a [`Placement`]:
//!
//! ```yaml
//! n_qubits: 4
//! encoder:
//!   axis: Y
//!   features: [0.1, 0.2, 0.3, 0.4]
//! ansatz:
//!   template: butterfly_orthogonal
//!   depth: 2
//! trotter:
//!   hamiltonian:
//!     - coeff: 1.0
//!       pauli: [[0, Z], [1, Z]]
//!   time: 1.0
//!   steps: 2
//! placement: interleaved
//! ```
//!
//! Files ending in `.json` are parsed as JSON, everything else as YAML.

use std::path::Path;

use qcompose_ir::QubitRegister;
use serde::{Deserialize, Serialize};

use crate::circuit::ComposedCircuit;
use crate::composer::compose;
use crate::error::ComposeError;
use crate::spec::{AnsatzBlock, EncoderBlock, Placement, SegmentSpec, TrotterBlock};

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    IoError(String),

    /// The file is not valid YAML or JSON for this schema.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The configuration is structurally inconsistent.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Composition of the configured segments failed.
    #[error("Composition error: {0}")]
    Compose(#[from] ComposeError),
}

/// A complete composition request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionConfig {
    /// Register size.
    pub n_qubits: u32,

    /// Explicit segment order. Excludes the block fields below.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<SegmentSpec>,

    /// Encoder, always placed first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoder: Option<EncoderBlock>,

    /// Ansatz block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ansatz: Option<AnsatzBlock>,

    /// Trotter block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trotter: Option<TrotterBlock>,

    /// Where the Trotter block goes relative to the ansatz.
    #[serde(default)]
    pub placement: Placement,
}

impl CompositionConfig {
    /// Load and validate a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&contents)?
        } else {
            Self::from_yaml(&contents)?
        };
        Ok(config)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the structural consistency of the configuration.
    ///
    /// Segment-level errors (feature length, depth, Hamiltonian) are left to
    /// composition, which reports them with the segment index.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_qubits == 0 {
            return Err(ConfigError::ValidationError(
                "n_qubits must be greater than 0".to_string(),
            ));
        }

        let has_blocks = self.encoder.is_some() || self.ansatz.is_some() || self.trotter.is_some();
        if !self.segments.is_empty() && has_blocks {
            return Err(ConfigError::ValidationError(
                "segments cannot be combined with encoder/ansatz/trotter blocks".to_string(),
            ));
        }

        if self.placement == Placement::Interleaved
            && (self.ansatz.is_none() || self.trotter.is_none())
        {
            return Err(ConfigError::ValidationError(
                "interleaved placement needs both an ansatz and a trotter block".to_string(),
            ));
        }
        Ok(())
    }

    /// The register.
    pub fn register(&self) -> QubitRegister {
        QubitRegister::new(self.n_qubits)
    }

    /// The ordered segment descriptors this configuration describes.
    pub fn segment_specs(&self) -> Vec<SegmentSpec> {
        if !self.segments.is_empty() {
            return self.segments.clone();
        }

        let mut specs = vec![];
        if let Some(encoder) = &self.encoder {
            specs.push(SegmentSpec::Encoder(encoder.clone()));
        }
        match (&self.ansatz, &self.trotter) {
            (Some(ansatz), Some(trotter)) => {
                specs.extend(self.placement.arrange(ansatz, trotter, self.n_qubits));
            }
            (Some(ansatz), None) => specs.push(SegmentSpec::Ansatz(ansatz.clone())),
            (None, Some(trotter)) => specs.push(SegmentSpec::Trotter(trotter.clone())),
            (None, None) => {}
        }
        specs
    }

    /// Compose the configured circuit.
    pub fn compose(&self) -> Result<ComposedCircuit, ConfigError> {
        Ok(compose(self.register(), &self.segment_specs())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcompose_ir::SegmentKind;

    const EXAMPLE: &str = r#"
n_qubits: 4
encoder:
  axis: Y
  features: [0.1, 0.2, 0.3, 0.4]
ansatz:
  template: butterfly_orthogonal
  depth: 2
trotter:
  hamiltonian:
    - coeff: 1.0
      pauli: [[0, Z], [1, Z]]
  time: 1.0
  steps: 2
placement: interleaved
"#;

    #[test]
    fn parse_and_compose_yaml() {
        let config = CompositionConfig::from_yaml(EXAMPLE).unwrap();
        let kinds: Vec<_> = config.segment_specs().iter().map(SegmentSpec::kind).collect();
        assert_eq!(
            kinds,
            vec![
                SegmentKind::Encoder,
                SegmentKind::Ansatz,
                SegmentKind::Trotter,
                SegmentKind::Ansatz,
                SegmentKind::Trotter
            ]
        );

        let circuit = config.compose().unwrap();
        assert_eq!(circuit.num_parameters(), 4 + 8);
    }

    #[test]
    fn default_placement_is_after() {
        let config = CompositionConfig::from_yaml(&EXAMPLE.replace("placement: interleaved\n", ""))
            .unwrap();
        assert_eq!(config.placement, Placement::After);
        assert_eq!(config.segment_specs().len(), 3);
    }

    #[test]
    fn zero_qubits_rejected() {
        let err = CompositionConfig::from_yaml("n_qubits: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn segments_and_blocks_conflict() {
        let yaml = "n_qubits: 2\nsegments:\n  - kind: ansatz\n    template: brickwork\n    depth: 1\nansatz:\n  template: brickwork\n  depth: 1\n";
        assert!(matches!(
            CompositionConfig::from_yaml(yaml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn interleaved_needs_both_blocks() {
        let yaml = "n_qubits: 2\nansatz:\n  template: brickwork\n  depth: 1\nplacement: interleaved\n";
        assert!(matches!(
            CompositionConfig::from_yaml(yaml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn json_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compose.json");
        std::fs::write(
            &path,
            r#"{"n_qubits": 3, "segments": [{"kind": "encoder", "axis": "Z", "features": [1, 2, 3]}]}"#,
        )
        .unwrap();
        let config = CompositionConfig::from_file(&path).unwrap();
        assert_eq!(config.segments.len(), 1);
        assert_eq!(config.compose().unwrap().len(), 3);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            CompositionConfig::from_file("/nonexistent/compose.yaml"),
            Err(ConfigError::IoError(_))
        ));
    }

    #[test]
    fn overflowing_start_layer_is_an_error() {
        let yaml = "n_qubits: 4\nansatz:\n  template: brickwork\n  depth: 1\n  start_layer: 18446744073709551615\n";
        let config = CompositionConfig::from_yaml(yaml).unwrap();
        let Err(ConfigError::Compose(err)) = config.compose() else {
            panic!("expected a composition error");
        };
        assert_eq!(err.kind(), crate::ErrorKind::InvalidDepth);
        assert_eq!(err.segment(), Some(0));
    }

    #[test]
    fn far_qcn_start_layer_fails_fast() {
        let yaml = "n_qubits: 4\nansatz:\n  template: qcn\n  depth: 1\n  start_layer: 3000000000\nplacement: after\n";
        let config = CompositionConfig::from_yaml(yaml).unwrap();
        let Err(ConfigError::Compose(err)) = config.compose() else {
            panic!("expected a composition error");
        };
        assert_eq!(err.kind(), crate::ErrorKind::QubitCountMismatch);
    }

    #[test]
    fn composition_errors_surface() {
        let yaml = "n_qubits: 4\nencoder:\n  axis: X\n  features: [0.0, 0.0, 0.0]\n";
        let config = CompositionConfig::from_yaml(yaml).unwrap();
        assert!(matches!(
            config.compose(),
            Err(ConfigError::Compose(ComposeError::Ansatz { segment: 0, .. }))
        ));
    }
}
