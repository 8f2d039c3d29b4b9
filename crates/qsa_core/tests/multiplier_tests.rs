//! Unit tests for the pipelined complex multiplier.

use num_complex::Complex32;
use qsa_core::multiplier::{ComplexMultiplier, MultiplierArray, PARALLEL_UNITS};

fn c(re: f32, im: f32) -> Complex32 {
    Complex32::new(re, im)
}

fn approx_eq(a: Complex32, b: Complex32) {
    assert!(
        (a.re - b.re).abs() < 1e-6 && (a.im - b.im).abs() < 1e-6,
        "{a} != {b}"
    );
}

/// Tests that a product appears exactly two ticks after its operands.
#[test]
fn test_two_tick_latency() {
    let mut unit = ComplexMultiplier::new();
    let zero = c(0.0, 0.0);

    let first = unit.tick(c(1.0, 2.0), c(3.0, 4.0));
    assert_eq!(first, zero);

    // (1+2i)(3+4i) = -5 + 10i
    let second = unit.tick(zero, zero);
    assert_eq!(second, c(-5.0, 10.0));
    assert_eq!(unit.output(), c(-5.0, 10.0));
}

/// Tests that back-to-back operands stream through the pipeline.
#[test]
fn test_pipelined_stream() {
    let mut unit = ComplexMultiplier::new();
    let zero = c(0.0, 0.0);

    unit.tick(c(2.0, 0.0), c(3.0, 0.0));
    let first = unit.tick(c(0.0, 1.0), c(0.0, 1.0));
    assert_eq!(first, c(6.0, 0.0));
    let second = unit.tick(zero, zero);
    assert_eq!(second, c(-1.0, 0.0));
}

/// Tests a purely real dot product over one chunk.
#[test]
fn test_dot_row_real() {
    let mut array = MultiplierArray::new();
    let row = [c(1.0, 0.0), c(2.0, 0.0)];
    let amps = [c(3.0, 0.0), c(4.0, 0.0)];
    assert_eq!(array.dot_row(&row, &amps), c(11.0, 0.0));
}

/// Tests a complex dot product spanning several pipeline chunks.
#[test]
fn test_dot_row_multi_chunk() {
    let mut array = MultiplierArray::new();

    let dim = PARALLEL_UNITS * 2;
    let row: Vec<Complex32> = (0..dim).map(|k| c(k as f32, 1.0)).collect();
    let amps: Vec<Complex32> = (0..dim).map(|k| c(1.0, k as f32)).collect();

    let mut expected = c(0.0, 0.0);
    for k in 0..dim {
        expected += row[k] * amps[k];
    }
    approx_eq(array.dot_row(&row, &amps), expected);
}

/// Tests that identical inputs give bit-identical accumulation results.
#[test]
fn test_deterministic_accumulation() {
    let row = [c(0.1, 0.2), c(0.3, -0.4), c(-0.5, 0.6), c(0.7, 0.8), c(0.9, -1.0)];
    let amps = [c(1.0, 0.1), c(0.2, 1.3), c(-1.4, 0.5), c(0.6, -0.7), c(0.8, 0.9)];

    let mut a = MultiplierArray::new();
    let mut b = MultiplierArray::new();
    let first = a.dot_row(&row, &amps);
    let second = b.dot_row(&row, &amps);
    assert_eq!(first.re.to_bits(), second.re.to_bits());
    assert_eq!(first.im.to_bits(), second.im.to_bits());
}
