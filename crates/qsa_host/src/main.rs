mod bench;
mod circuit;
mod driver;
mod error_sim;
mod gates;
mod qec;
mod stats;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a circuit file and print the final state.
    Run {
        #[arg(short, long)]
        circuit: String,
        #[arg(long)]
        all_states: bool,
    },
    /// Run closed-loop error-correction cycles against simulated errors.
    Qec {
        #[arg(long, default_value_t = 1000)]
        cycles: usize,
        #[arg(long, default_value_t = 0.001)]
        error_rate: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        shots: Option<String>,
    },
    /// Benchmark gate throughput and the feedback loop.
    Bench {
        #[arg(long, default_value_t = 10)]
        qubits: u32,
        #[arg(long, default_value_t = 10_000)]
        shots: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            circuit,
            all_states,
        } => {
            circuit::run_circuit_file(&circuit, all_states)?;
        }
        Commands::Qec {
            cycles,
            error_rate,
            seed,
            shots,
        } => {
            qec::run_qec(cycles, error_rate, seed, shots)?;
        }
        Commands::Bench { qubits, shots } => {
            bench::run_benchmark(qubits, shots)?;
        }
    }
    Ok(())
}
