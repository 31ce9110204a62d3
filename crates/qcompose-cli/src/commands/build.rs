//! Build command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;

use qcompose_circuit::{
    ComposedCircuit, CompositionConfig, ExecutionBackend, ReferenceBackend, ReferenceOutcome,
};
use tracing::info;

/// Execute the build command.
pub fn execute(config: &str, format: &str, output: Option<&str>, run: bool) -> Result<()> {
    let cfg = CompositionConfig::from_file(config)
        .with_context(|| format!("Failed to load configuration: {config}"))?;
    let circuit = cfg.compose()?;
    info!(
        n_qubits = circuit.num_qubits(),
        n_ops = circuit.len(),
        n_params = circuit.num_parameters(),
        "composed circuit from {config}"
    );

    let document = match format.to_lowercase().as_str() {
        "summary" => None,
        "json" => Some(
            serde_json::to_string_pretty(&circuit)
                .map_err(|e| anyhow::anyhow!("Serialize error: {e}"))?,
        ),
        "yaml" | "yml" => Some(
            serde_yaml_ng::to_string(&circuit)
                .map_err(|e| anyhow::anyhow!("Serialize error: {e}"))?,
        ),
        other => anyhow::bail!("Unknown format: '{other}'. Available: summary, json, yaml"),
    };

    match (document, output) {
        (Some(doc), Some(path)) => {
            fs::write(path, doc).with_context(|| format!("Failed to write file: {path}"))?;
            print_summary(config, &circuit);
            println!("  Output: {}", style(path).green());
        }
        // Machine-readable output owns stdout.
        (Some(doc), None) => println!("{doc}"),
        (None, _) => print_summary(config, &circuit),
    }

    if run {
        let outcome = ReferenceBackend.execute(&circuit, &circuit.parameters().values())?;
        print_outcome(&outcome, circuit.num_qubits());
    }

    Ok(())
}

fn print_summary(config: &str, circuit: &ComposedCircuit) {
    println!(
        "{} Composed {} on {} qubits",
        style("✓").green().bold(),
        style(config).green(),
        style(circuit.num_qubits()).yellow()
    );
    println!(
        "  {} ops, {} entanglers, {} parameters",
        circuit.len(),
        circuit.entangler_count(),
        circuit.num_parameters()
    );

    println!("\n  Segments:");
    for (i, span) in circuit.segments().iter().enumerate() {
        println!(
            "  {:>3}  {:<8}  {}  ops {:>5}..{:<5}  params {:>4}..{:<4}",
            i,
            span.kind.to_string(),
            style(format!("{:<24}", span.label)).cyan(),
            span.ops.start,
            span.ops.end,
            span.parameters.start,
            span.parameters.end
        );
    }

    let mut gates: Vec<_> = circuit.gate_counts().into_iter().collect();
    gates.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    if !gates.is_empty() {
        println!("\n  Gates:");
        for (name, count) in gates {
            println!("  {:>8}  {}", count, style(name).cyan());
        }
    }
}

fn print_outcome(outcome: &ReferenceOutcome, n_qubits: u32) {
    println!(
        "\n{} Reference simulation (initial values):",
        style("✓").green().bold()
    );

    for (q, z) in outcome.expectations.iter().enumerate() {
        println!("  ⟨Z{q}⟩ = {z:>+.6}");
    }

    let mut ranked: Vec<(usize, f64)> = outcome.probabilities.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    println!();
    for (index, prob) in ranked.iter().take(16).filter(|(_, p)| *p > 1e-12) {
        // Qubit 0 is the rightmost bit.
        let bits = format!("{index:0width$b}", width = n_qubits as usize);
        let bar: String = "█".repeat((prob * 50.0).round() as usize);
        println!(
            "  {}: {:>7.3}% {}",
            style(bits).cyan(),
            prob * 100.0,
            style(bar).green()
        );
    }
}
