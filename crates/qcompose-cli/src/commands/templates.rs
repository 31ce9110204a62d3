//! Templates command implementation.

use anyhow::Result;
use console::style;

use qcompose_ansatz::{AnsatzSpec, AnsatzTemplate};
use qcompose_ir::QubitRegister;

/// One row of the template table.
pub struct TemplateRow {
    pub template: AnsatzTemplate,
    /// Slot, gate and entangler counts, or the violated requirement.
    pub shape: Result<(usize, usize, usize), String>,
}

/// Build every template at `depth` on `n_qubits`.
pub fn survey(n_qubits: u32, depth: usize) -> Vec<TemplateRow> {
    AnsatzTemplate::ALL
        .into_iter()
        .map(|template| {
            let shape = AnsatzSpec::new(template, depth)
                .build(QubitRegister::new(n_qubits), None)
                .map(|segment| {
                    let entanglers = segment.ops().iter().filter(|op| op.is_entangling()).count();
                    (segment.num_parameters(), segment.len(), entanglers)
                })
                .map_err(|e| e.to_string());
            TemplateRow { template, shape }
        })
        .collect()
}

/// Execute the templates command.
pub fn execute(n_qubits: u32, depth: usize) -> Result<()> {
    if n_qubits == 0 {
        anyhow::bail!("Register size must be greater than 0");
    }
    if depth == 0 {
        anyhow::bail!("Depth must be greater than 0");
    }

    println!(
        "{} Ansatz templates on {} qubits, depth {}",
        style("→").cyan().bold(),
        style(n_qubits).yellow(),
        style(depth).yellow()
    );
    println!();
    println!(
        "  {:<22}  {:>6}  {:>6}  {:>10}",
        "TEMPLATE", "SLOTS", "OPS", "ENTANGLERS"
    );

    for row in survey(n_qubits, depth) {
        match row.shape {
            Ok((slots, ops, entanglers)) => println!(
                "  {}  {:>6}  {:>6}  {:>10}",
                style(format!("{:<22}", row.template.name())).cyan(),
                slots,
                ops,
                entanglers
            ),
            Err(reason) => println!(
                "  {}  {}",
                style(format!("{:<22}", row.template.name())).dim(),
                style(reason).dim()
            ),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survey_covers_every_template() {
        let rows = survey(4, 1);
        assert_eq!(rows.len(), AnsatzTemplate::ALL.len());
        let butterfly = rows
            .iter()
            .find(|r| r.template == AnsatzTemplate::ButterflyOrthogonal)
            .unwrap();
        assert_eq!(butterfly.shape.as_ref().unwrap().0, 4);
    }

    #[test]
    fn unsupported_sizes_are_reported() {
        let rows = survey(3, 1);
        let butterfly = rows
            .iter()
            .find(|r| r.template == AnsatzTemplate::ButterflyOrthogonal)
            .unwrap();
        assert!(butterfly.shape.is_err());
    }
}
