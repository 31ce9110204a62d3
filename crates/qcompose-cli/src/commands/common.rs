//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use qcompose_ansatz::AnsatzTemplate;
use qcompose_sim::{Hamiltonian, HamiltonianTerm, PauliString, TrotterOrder};

/// Parse a template by its snake-case name.
pub fn parse_template(name: &str) -> Result<AnsatzTemplate> {
    let name = name.to_lowercase().replace('-', "_");
    AnsatzTemplate::ALL
        .into_iter()
        .find(|t| t.name() == name)
        .ok_or_else(|| {
            let available: Vec<_> = AnsatzTemplate::ALL.iter().map(|t| t.name()).collect();
            anyhow::anyhow!(
                "Unknown template: '{name}'. Available: {}",
                available.join(", ")
            )
        })
}

/// Parse a product-formula order.
pub fn parse_order(order: &str) -> Result<TrotterOrder> {
    match order.to_lowercase().as_str() {
        "1" | "first" => Ok(TrotterOrder::First),
        "2" | "second" => Ok(TrotterOrder::Second),
        other => anyhow::bail!("Unknown order: '{other}'. Available: first, second"),
    }
}

/// Parse a `LABEL=COEFF` term such as `XZ=0.5`.
pub fn parse_term(term: &str) -> Result<HamiltonianTerm> {
    let (label, coeff) = term
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Invalid term '{term}': expected LABEL=COEFF"))?;
    let coeff: f64 = coeff
        .trim()
        .parse()
        .with_context(|| format!("Invalid coefficient in term '{term}'"))?;
    let pauli = PauliString::from_label(label.trim())
        .map_err(|e| anyhow::anyhow!("Invalid term '{term}': {e}"))?;
    Ok(HamiltonianTerm::new(coeff, pauli))
}

/// Load a Hamiltonian from a YAML or JSON file.
pub fn load_hamiltonian(path: &str) -> Result<Hamiltonian> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    let ext = path_obj.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext.to_lowercase().as_str() {
        "json" => serde_json::from_str(&source).map_err(|e| anyhow::anyhow!("Parse error: {e}")),
        _ => serde_yaml_ng::from_str(&source).map_err(|e| anyhow::anyhow!("Parse error: {e}")),
    }
}
