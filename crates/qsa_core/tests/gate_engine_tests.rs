//! Unit tests for the gate application engine.

use num_complex::Complex32;
use qsa_common::gate::GateSize;
use qsa_core::CoreError;
use qsa_core::gate_engine::{GateDescriptor, GateEngine, GateState};
use qsa_core::statevector::StatevectorStore;
use std::f32::consts::FRAC_1_SQRT_2;

fn c(re: f32, im: f32) -> Complex32 {
    Complex32::new(re, im)
}

fn approx_eq(a: Complex32, b: Complex32) {
    assert!(
        (a.re - b.re).abs() < 1e-6 && (a.im - b.im).abs() < 1e-6,
        "{a} != {b}"
    );
}

fn pauli_x(qubit: u32) -> GateDescriptor {
    let m = [c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)];
    GateDescriptor::new(GateSize::One, 1 << qubit, &m).unwrap()
}

fn hadamard(qubit: u32) -> GateDescriptor {
    let s = FRAC_1_SQRT_2;
    let m = [c(s, 0.0), c(s, 0.0), c(s, 0.0), c(-s, 0.0)];
    GateDescriptor::new(GateSize::One, 1 << qubit, &m).unwrap()
}

/// Runs the engine with a constant start level until done, returning the
/// tick count including the idle tick that samples the trigger.
fn run_to_done(engine: &mut GateEngine, store: &mut StatevectorStore, limit: usize) -> usize {
    for tick in 1..=limit {
        let start = tick == 1;
        if engine.tick(store, start) {
            return tick;
        }
    }
    panic!("gate did not complete within {limit} ticks");
}

/// Tests descriptor validation of the size class against the qubit mask.
#[test]
fn test_descriptor_arity_check() {
    let m = [c(0.0, 0.0); 4];
    assert_eq!(
        GateDescriptor::new(GateSize::One, 0b11, &m).err(),
        Some(CoreError::GateArityMismatch)
    );
    assert_eq!(
        GateDescriptor::new(GateSize::Two, 0b1, &m).err(),
        Some(CoreError::GateArityMismatch)
    );
}

/// Tests descriptor validation of the matrix entry count.
#[test]
fn test_descriptor_matrix_check() {
    let m = [c(0.0, 0.0); 4];
    assert_eq!(
        GateDescriptor::new(GateSize::Two, 0b11, &m).err(),
        Some(CoreError::MatrixTooSmall)
    );
}

/// Tests the parallel-array wire encoding of a descriptor.
#[test]
fn test_descriptor_from_parallel() {
    let re = [0.0, 1.0, 1.0, 0.0];
    let im = [0.0; 4];
    let d = GateDescriptor::from_parallel(GateSize::One, 0b1, &re, &im).unwrap();
    assert_eq!(d.row(0)[1], c(1.0, 0.0));
    assert_eq!(d.row(1)[0], c(1.0, 0.0));
}

/// Tests a single X gate application and its exact tick count.
#[test]
fn test_x_gate_timing_and_result() {
    let mut store = StatevectorStore::new(1).unwrap();
    let mut engine = GateEngine::new(1);
    engine.load_descriptor(pauli_x(0));

    // 1 idle + 2 read + 2 compute + 2 write + 1 done
    let ticks = run_to_done(&mut engine, &mut store, 20);
    assert_eq!(ticks, 8);

    assert_eq!(store.amplitudes()[0], c(0.0, 0.0));
    assert_eq!(store.amplitudes()[1], c(1.0, 0.0));
}

/// Tests that a 2-qubit gate takes 3 * 4 + 2 ticks.
#[test]
fn test_two_qubit_gate_timing() {
    let mut store = StatevectorStore::new(2).unwrap();
    let mut engine = GateEngine::new(2);

    // CNOT with control on qubit 0, target on qubit 1.
    let mut m = [c(0.0, 0.0); 16];
    for (row, col) in [(0, 0), (3, 1), (2, 2), (1, 3)] {
        m[row * 4 + col] = c(1.0, 0.0);
    }
    engine.load_descriptor(GateDescriptor::new(GateSize::Two, 0b11, &m).unwrap());

    let ticks = run_to_done(&mut engine, &mut store, 30);
    assert_eq!(ticks, 14);
}

/// Tests that gate_done is high for exactly one tick.
#[test]
fn test_done_pulse_width() {
    let mut store = StatevectorStore::new(1).unwrap();
    let mut engine = GateEngine::new(1);
    engine.load_descriptor(pauli_x(0));

    run_to_done(&mut engine, &mut store, 20);
    assert!(!engine.tick(&mut store, false));
    assert!(engine.is_idle());
}

/// Tests that a start level held high while busy does not re-trigger.
#[test]
fn test_busy_retrigger_ignored() {
    let mut store = StatevectorStore::new(1).unwrap();
    let mut engine = GateEngine::new(1);
    engine.load_descriptor(pauli_x(0));

    // Hold start high through the busy window, drop it before Done.
    assert!(!engine.tick(&mut store, true));
    for _ in 0..6 {
        assert!(!engine.tick(&mut store, true));
    }
    assert!(engine.tick(&mut store, false));

    // A second application would restore |0>.
    assert_eq!(store.amplitudes()[1], c(1.0, 0.0));
}

/// Tests that descriptor loads are ignored while a gate is in flight.
#[test]
fn test_descriptor_locked_while_busy() {
    let mut store = StatevectorStore::new(1).unwrap();
    let mut engine = GateEngine::new(1);
    engine.load_descriptor(pauli_x(0));

    assert!(!engine.tick(&mut store, true));
    engine.load_descriptor(GateDescriptor::identity());
    for _ in 0..6 {
        assert!(!engine.tick(&mut store, false));
    }
    assert!(engine.tick(&mut store, false));

    assert_eq!(store.amplitudes()[1], c(1.0, 0.0));
}

/// Tests a full-statevector sweep by re-triggering once per group.
#[test]
fn test_full_sweep_x_gate() {
    let mut store = StatevectorStore::new(2).unwrap();
    let mut engine = GateEngine::new(2);
    engine.load_descriptor(pauli_x(0));
    assert_eq!(engine.num_groups(), 2);

    for _ in 0..engine.num_groups() {
        run_to_done(&mut engine, &mut store, 20);
    }

    // X on qubit 0: |00> -> |01>.
    assert_eq!(store.amplitudes()[1], c(1.0, 0.0));
    assert_eq!(store.amplitudes()[0], c(0.0, 0.0));
}

/// Tests that a single trigger touches no amplitude outside its group.
#[test]
fn test_untouched_addresses() {
    let mut store = StatevectorStore::new(2).unwrap();
    store.port_a(2, Some(c(0.25, 0.5)));
    store.port_a(3, Some(c(-0.5, 0.25)));

    let mut engine = GateEngine::new(2);
    engine.load_descriptor(pauli_x(0));
    run_to_done(&mut engine, &mut store, 20);

    // Group 0 covers addresses 0 and 1 only.
    assert_eq!(store.amplitudes()[2], c(0.25, 0.5));
    assert_eq!(store.amplitudes()[3], c(-0.5, 0.25));
}

/// Tests that the identity gate leaves amplitudes bit-identical.
#[test]
fn test_identity_idempotence() {
    let mut store = StatevectorStore::new(2).unwrap();
    store.port_a(0, Some(c(0.5, 0.125)));
    store.port_a(1, Some(c(0.25, 0.75)));
    store.port_a(2, Some(c(0.125, 0.5)));
    store.port_a(3, Some(c(0.75, 0.25)));
    let before: Vec<Complex32> = store.amplitudes().to_vec();

    let mut engine = GateEngine::new(2);
    engine.load_descriptor(GateDescriptor::identity());
    for _ in 0..engine.num_groups() {
        run_to_done(&mut engine, &mut store, 20);
    }

    assert_eq!(store.amplitudes(), &before[..]);
}

/// Tests two Hadamard sweeps returning the state to |0>.
#[test]
fn test_hadamard_involution() {
    let mut store = StatevectorStore::new(1).unwrap();
    let mut engine = GateEngine::new(1);
    engine.load_descriptor(hadamard(0));

    run_to_done(&mut engine, &mut store, 20);
    approx_eq(store.amplitudes()[0], c(FRAC_1_SQRT_2, 0.0));
    approx_eq(store.amplitudes()[1], c(FRAC_1_SQRT_2, 0.0));

    run_to_done(&mut engine, &mut store, 20);
    approx_eq(store.amplitudes()[0], c(1.0, 0.0));
    approx_eq(store.amplitudes()[1], c(0.0, 0.0));
}

/// Tests that the engine steps through the documented state sequence.
#[test]
fn test_state_sequence() {
    let mut store = StatevectorStore::new(1).unwrap();
    let mut engine = GateEngine::new(1);
    engine.load_descriptor(pauli_x(0));
    assert_eq!(engine.state(), GateState::Idle);

    engine.tick(&mut store, true);
    assert_eq!(engine.state(), GateState::ReadAmplitudes);
    engine.tick(&mut store, false);
    engine.tick(&mut store, false);
    assert_eq!(engine.state(), GateState::Compute);
    engine.tick(&mut store, false);
    engine.tick(&mut store, false);
    assert_eq!(engine.state(), GateState::WriteResults);
    engine.tick(&mut store, false);
    engine.tick(&mut store, false);
    assert_eq!(engine.state(), GateState::Done);
    engine.tick(&mut store, false);
    assert_eq!(engine.state(), GateState::Idle);
}
