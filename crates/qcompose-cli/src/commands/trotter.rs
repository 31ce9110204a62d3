//! Trotter command implementation.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qcompose_sim::reference::{MAX_QUBITS, trotter_infidelity};
use qcompose_sim::{Hamiltonian, TrotterEvolution};

use super::common::{load_hamiltonian, parse_order, parse_term};

/// One measured point of the sweep.
#[derive(Debug, Clone, Copy)]
pub struct SweepPoint {
    pub steps: usize,
    pub gates: usize,
    pub infidelity: f64,
}

/// Assemble the Hamiltonian from a file and/or inline terms.
pub fn collect_hamiltonian(terms: &[String], file: Option<&str>) -> Result<Hamiltonian> {
    let mut all = match file {
        Some(path) => load_hamiltonian(path)?.terms().to_vec(),
        None => vec![],
    };
    for term in terms {
        all.push(parse_term(term)?);
    }
    if all.is_empty() {
        anyhow::bail!("No Hamiltonian given: pass --term or --hamiltonian");
    }
    Ok(Hamiltonian::from_terms(all))
}

/// Execute the trotter command.
pub fn execute(
    terms: &[String],
    hamiltonian: Option<&str>,
    time: f64,
    steps: &[usize],
    order: &str,
    qubits: Option<u32>,
) -> Result<()> {
    let h = collect_hamiltonian(terms, hamiltonian)?;
    h.validate()?;
    let order = parse_order(order)?;
    let n_qubits = qubits.unwrap_or_else(|| h.min_qubits());

    if n_qubits > MAX_QUBITS {
        anyhow::bail!("Register of {n_qubits} qubits exceeds the reference limit of {MAX_QUBITS}");
    }
    if steps.is_empty() {
        anyhow::bail!("No step counts given");
    }

    println!(
        "{} {} terms on {} qubits, t = {}, {:?} order",
        style("→").cyan().bold(),
        h.n_terms(),
        style(n_qubits).yellow(),
        style(time).yellow(),
        order
    );

    let bar = ProgressBar::new(steps.len() as u64);
    bar.set_style(ProgressStyle::default_bar().template("{spinner:.cyan} [{bar:30}] {pos}/{len} {msg}")?);

    let mut points = Vec::with_capacity(steps.len());
    for &s in steps {
        bar.set_message(format!("S = {s}"));
        let evolution = TrotterEvolution::new(h.clone(), time, s).with_order(order);
        points.push(SweepPoint {
            steps: s,
            gates: evolution.gate_count(),
            infidelity: trotter_infidelity(&evolution, n_qubits)?,
        });
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!("{} Sweep complete", style("✓").green().bold());
    println!();
    println!("  {:>6}  {:>8}  {:>14}", "STEPS", "GATES", "INFIDELITY");
    for p in &points {
        println!(
            "  {:>6}  {:>8}  {:>14}",
            p.steps,
            p.gates,
            style(format!("{:.3e}", p.infidelity)).cyan()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_and_file_combine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("h.yaml");
        std::fs::write(&path, "- coeff: 1.0\n  pauli: [[0, Z], [1, Z]]\n").unwrap();

        let h = collect_hamiltonian(&["XI=0.5".to_string()], path.to_str()).unwrap();
        assert_eq!(h.n_terms(), 2);
        assert_eq!(h.min_qubits(), 2);
    }

    #[test]
    fn empty_hamiltonian_rejected() {
        assert!(collect_hamiltonian(&[], None).is_err());
    }
}
