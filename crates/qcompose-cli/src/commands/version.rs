//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - variational circuit composition",
        style("qcompose").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qcompose-ir       Gates, parameter slots and segments");
    println!("  qcompose-sim      Hamiltonians, Trotter decomposition, reference simulator");
    println!("  qcompose-ansatz   Angle encoder and ansatz template library");
    println!("  qcompose-circuit  Composition sessions and configuration");
    println!("  qcompose-cli      Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
