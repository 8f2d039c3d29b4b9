use crate::driver::Driver;
use crate::error_sim::{ApplyAdapter, ErrorSimulator, MeasureAdapter};
use crate::stats::CycleStats;
use anyhow::{Result, ensure};
use qsa_common::qec::NUM_PHYSICAL_QUBITS;
use qsa_io::loader;
use std::cell::RefCell;
use std::rc::Rc;

pub fn run_qec(
    cycles: usize,
    error_rate: f64,
    seed: u64,
    shots_path: Option<String>,
) -> Result<()> {
    ensure!(
        (0.0..=1.0).contains(&error_rate),
        "error rate must be a probability, got {error_rate}"
    );

    let shots = match &shots_path {
        Some(path) => {
            println!("Loading shots from {}...", path);
            let shots = loader::load_shot_file(path)?;
            ensure!(!shots.is_empty(), "shot file {} holds no records", path);
            println!("Loaded {} shots.", shots.len());
            Some(shots)
        }
        None => None,
    };

    println!("QEC FEEDBACK LOOP");
    println!("Cycles: {}", cycles);
    match &shots {
        Some(shots) => println!("Errors: replayed from {} recorded shots", shots.len()),
        None => println!("Errors: i.i.d. p = {} (seed {})", error_rate, seed),
    }
    println!("-------------------------------");

    let sim = Rc::new(RefCell::new(ErrorSimulator::new(error_rate, seed)));
    let mut driver = Driver::with_collaborators(
        NUM_PHYSICAL_QUBITS as u32,
        Box::new(MeasureAdapter::new(sim.clone())),
        Box::new(ApplyAdapter::new(sim.clone())),
    )?;

    let mut stats = CycleStats::new();
    let mut corrections = 0u64;
    let mut clean = 0u64;

    for i in 0..cycles {
        match &shots {
            Some(shots) => {
                let (x, z) = shots[i % shots.len()];
                sim.borrow_mut().inject_pattern(x, z);
            }
            None => sim.borrow_mut().inject(),
        }

        let before = driver.cycles();
        let correction = driver.run_cycle()?;
        stats.update(driver.cycles() - before);

        if !correction.is_clear() {
            corrections += 1;
        }
        if sim.borrow().is_clean() {
            clean += 1;
        }
    }

    println!("Results");
    println!("Cycles run:   {}", cycles);
    println!("Corrections:  {}", corrections);
    println!(
        "Clean after:  {}/{} ({:.2}%)",
        clean,
        cycles,
        100.0 * clean as f64 / cycles.max(1) as f64
    );
    println!("Total ticks:  {}", driver.cycles());
    stats.print_report();

    Ok(())
}
