use crate::driver::Driver;
use crate::error_sim::{ApplyAdapter, ErrorSimulator, MeasureAdapter};
use crate::gates;
use anyhow::Result;
use qsa_common::qec::NUM_PHYSICAL_QUBITS;
use qsa_io::parser::CircuitOp;
use rayon::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

const SWEEP_RATES: [f64; 6] = [0.001, 0.002, 0.005, 0.01, 0.02, 0.05];
const SWEEP_SEED: u64 = 0xC0DE;

pub fn run_benchmark(num_qubits: u32, shots: usize) -> Result<()> {
    gate_benchmark(num_qubits)?;
    sweep_benchmark(shots)
}

/// Full-statevector Hadamard sweep on every qubit. Each gate re-triggers
/// the engine once per two-amplitude group, so tick counts grow with the
/// Hilbert space while ticks-per-trigger stay fixed.
fn gate_benchmark(num_qubits: u32) -> Result<()> {
    println!("GATE THROUGHPUT ({} qubits)", num_qubits);

    let mut driver = Driver::new(num_qubits)?;
    let start = Instant::now();
    for q in 0..num_qubits {
        driver.apply_gate(gates::descriptor_for(&CircuitOp::H(q))?)?;
    }
    let elapsed = start.elapsed();

    let ticks = driver.cycles();
    let triggers = num_qubits as u64 * (1u64 << (num_qubits - 1));
    println!(
        "Gates: {}  Triggers: {}  Ticks: {} ({} ticks/trigger)",
        num_qubits,
        triggers,
        ticks,
        ticks / triggers
    );
    println!(
        "Wall time: {:?} ({:.2} Mticks/s)",
        elapsed,
        ticks as f64 / elapsed.as_secs_f64() / 1e6
    );
    Ok(())
}

/// Clean-cycle fraction of the feedback loop across error rates, one
/// rate per rayon worker.
fn sweep_benchmark(shots: usize) -> Result<()> {
    println!("\nERROR-RATE SWEEP ({} shots per rate)", shots);
    let start = Instant::now();

    let results: Result<Vec<(f64, u64)>> = SWEEP_RATES
        .par_iter()
        .map(|&rate| {
            let sim = Rc::new(RefCell::new(ErrorSimulator::new(rate, SWEEP_SEED)));
            let mut driver = Driver::with_collaborators(
                NUM_PHYSICAL_QUBITS as u32,
                Box::new(MeasureAdapter::new(sim.clone())),
                Box::new(ApplyAdapter::new(sim.clone())),
            )?;

            let mut clean = 0u64;
            for _ in 0..shots {
                sim.borrow_mut().inject();
                driver.run_cycle()?;
                if sim.borrow().is_clean() {
                    clean += 1;
                }
            }
            Ok((rate, clean))
        })
        .collect();

    for (rate, clean) in results? {
        println!(
            "p = {:.3}: {}/{} clean ({:.2}%)",
            rate,
            clean,
            shots,
            100.0 * clean as f64 / shots.max(1) as f64
        );
    }
    println!("Sweep time: {:?}", start.elapsed());
    Ok(())
}
