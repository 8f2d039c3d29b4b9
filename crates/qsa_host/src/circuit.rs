use crate::driver::Driver;
use crate::gates;
use anyhow::Result;
use qsa_io::parser;
use std::time::Instant;

pub fn run_circuit_file(path: &str, show_all: bool) -> Result<()> {
    println!("Loading circuit from {}...", path);
    let circuit = parser::load_circuit_file(path)?;
    println!(
        "Loaded {} qubits, {} gates.",
        circuit.num_qubits,
        circuit.ops.len()
    );

    let mut driver = Driver::new(circuit.num_qubits)?;
    let start = Instant::now();
    for op in &circuit.ops {
        driver.apply_gate(gates::descriptor_for(op)?)?;
    }
    let elapsed = start.elapsed();
    println!("Executed in {:?} ({} ticks).", elapsed, driver.cycles());

    println!("Final state:");
    let width = circuit.num_qubits as usize;
    let amplitudes = driver.store().amplitudes();
    for (basis, p) in driver.store().probabilities().iter().enumerate() {
        if show_all || *p > 1e-6 {
            let amp = amplitudes[basis];
            println!(
                "|{basis:0width$b}>  p = {p:.6}  ({:+.6} {:+.6}i)",
                amp.re, amp.im
            );
        }
    }
    Ok(())
}
