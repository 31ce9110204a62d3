//! qcompose command-line interface.
//!
//! Builds composed circuits from configuration files and reports on the
//! template library and Trotter accuracy.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{build, templates, trotter, version};

/// qcompose - variational circuit composition
#[derive(Parser)]
#[command(name = "qcompose")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a circuit from a YAML or JSON configuration
    Build {
        /// Configuration file
        #[arg(short, long)]
        config: String,

        /// Output format (summary, json, yaml)
        #[arg(short, long, default_value = "summary")]
        format: String,

        /// Write the circuit to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Run the circuit on the reference simulator with its initial values
        #[arg(long)]
        execute: bool,
    },

    /// List the ansatz templates with their slot and gate counts
    Templates {
        /// Register size
        #[arg(short = 'n', long, default_value = "4")]
        qubits: u32,

        /// Number of layers
        #[arg(short, long, default_value = "1")]
        depth: usize,
    },

    /// Measure Trotter infidelity against exact evolution
    Trotter {
        /// Hamiltonian term as LABEL=COEFF, e.g. ZZI=1.0 (repeatable)
        #[arg(short = 'T', long = "term")]
        terms: Vec<String>,

        /// Hamiltonian file (YAML or JSON list of terms)
        #[arg(long)]
        hamiltonian: Option<String>,

        /// Evolution time
        #[arg(short, long, default_value = "1.0")]
        time: f64,

        /// Step counts to compare
        #[arg(short, long, value_delimiter = ',', default_value = "1,2,4,8")]
        steps: Vec<usize>,

        /// Product-formula order (first, second)
        #[arg(long, default_value = "first")]
        order: String,

        /// Register size; defaults to the Hamiltonian's support
        #[arg(short = 'n', long)]
        qubits: Option<u32>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build {
            config,
            format,
            output,
            execute,
        } => build::execute(&config, &format, output.as_deref(), execute),

        Commands::Templates { qubits, depth } => templates::execute(qubits, depth),

        Commands::Trotter {
            terms,
            hamiltonian,
            time,
            steps,
            order,
            qubits,
        } => trotter::execute(&terms, hamiltonian.as_deref(), time, &steps, &order, qubits),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
